use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::store::{PayrollEngine, SeedData};

/// HTTP server for the payroll compliance engine.
#[derive(Debug, Parser)]
#[command(name = "payroll-server", version, about)]
struct Args {
    /// Directory holding mpf.yaml, statutory.yaml and reporting.yaml
    #[arg(long, env = "PAYROLL_CONFIG_DIR", default_value = "./config/hk")]
    config_dir: PathBuf,

    /// Optional YAML seed of employees, periods and disregarded entries
    #[arg(long, env = "PAYROLL_SEED")]
    seed: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "PAYROLL_BIND", default_value = "127.0.0.1:3000")]
    bind: String,

    /// Log calculation detail
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "payroll_engine=debug,info"
    } else {
        "payroll_engine=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = ConfigLoader::load(&args.config_dir)?.into_config();
    tracing::info!(config_dir = %args.config_dir.display(), "Statutory configuration loaded");

    let engine = match &args.seed {
        Some(path) => SeedData::load(path)?.into_engine(config)?,
        None => PayrollEngine::new(config),
    };

    let router = create_router(AppState::new(engine));
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!(address = %args.bind, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
