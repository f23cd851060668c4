//! plaudit server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and `PLAUDIT_*`
//! environment variables, loads the review dataset, and serves the review API
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use plaudit_core::ReviewService;
use plaudit_server::{ServerConfig, dataset};
use plaudit_vader::VaderScorer;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Plaudit review server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the dataset path from the configuration.
  #[arg(long)]
  dataset: Option<PathBuf>,

  /// Override the listen port from the configuration.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .set_default("host", ServerConfig::DEFAULT_HOST)?
    .set_default("port", ServerConfig::DEFAULT_PORT)?
    .set_default("dataset_path", ServerConfig::DEFAULT_DATASET_PATH)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PLAUDIT"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(dataset) = cli.dataset {
    server_cfg.dataset_path = dataset;
  }
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }

  // The dataset must load completely before any request is accepted.
  let records = dataset::load(&server_cfg.dataset_path).with_context(|| {
    format!("failed to load dataset from {:?}", server_cfg.dataset_path)
  })?;
  let service = ReviewService::new(VaderScorer::new());
  let loaded = service
    .load_initial(records)
    .context("failed to load initial dataset")?;
  tracing::info!(
    loaded,
    path = %server_cfg.dataset_path.display(),
    "dataset loaded"
  );

  let app = plaudit_server::app(Arc::new(service));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
