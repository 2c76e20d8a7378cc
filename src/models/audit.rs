//! Audit records for calculation transparency.
//!
//! Every calculator returns an [`AuditStep`] next to its figures so that a
//! payroll officer can see which rule produced each number.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     rule_id: "mpf_master_trust".to_string(),
///     rule_name: "MPF Master Trust Contribution".to_string(),
///     statutory_ref: "Cap. 485 Sch. 2 & 3".to_string(),
///     input: serde_json::json!({ "relevant_income": "18000" }),
///     output: serde_json::json!({ "employer_mandatory": "900" }),
///     reasoning: "$18000 x 5% = $900".to_string(),
/// };
/// assert_eq!(step.rule_id, "mpf_master_trust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the ordinance or scheme rule.
    pub statutory_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
