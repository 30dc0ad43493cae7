use std::{io::Read, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, span, Instrument, Level};
use tracing_subscriber::EnvFilter;

use crate::plugin::{CheckHealthHandler, InstanceDisposer, QueryDataHandler};

mod adapters;
mod datasource;
mod handler;
mod model;
mod plugin;
mod util;

#[derive(Parser)]
#[command(name = "farmpics-datasource", version, about = "Mint presigned S3 urls for a list of object keys")]
struct Cli {
    /// Instance settings json: `{"jsonData": {...}, "decryptedSecureJsonData": {...}}`
    #[arg(long)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign the `image_keys` of every query in a json array
    Query {
        /// Defaults to stdin
        #[arg(long)]
        queries: Option<PathBuf>,
    },
    /// Presign a canary object to check the bucket and credentials
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    run(cli)
        .instrument(span!(Level::INFO, "main", context = "main"))
        .await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    info!(settings=%cli.settings.display(), "called");

    let raw = std::fs::read_to_string(&cli.settings)
        .with_context(|| format!("failed to read settings: {}", cli.settings.display()))?;
    let instance: model::settings::DataSourceInstanceSettings =
        serde_json::from_str(&raw).context("failed to parse settings")?;

    let ds = datasource::Datasource::from_settings(&instance).await?;

    let outcome = execute(&ds, cli.command).await;

    ds.dispose();

    outcome
}

async fn execute(ds: &datasource::Datasource, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Query { queries } => {
            let input = match queries {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read queries: {}", path.display()))?,
                None => {
                    let mut input = String::new();
                    std::io::stdin()
                        .read_to_string(&mut input)
                        .context("failed to read queries from stdin")?;
                    input
                }
            };
            let req = util::queries::parse_queries(&input)?;

            let response = ds.query_data(&req).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Health => match ds.check_health().await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(err) => {
                println!("{}", serde_json::to_string_pretty(&err.result)?);
                return Err(err.into());
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::mock::MockPresigner;

    fn new_datasource() -> datasource::Datasource {
        datasource::Datasource::new(
            Box::new(MockPresigner::default()),
            "dummy-bucket",
            Duration::from_secs(900),
        )
    }

    #[tokio::test]
    async fn test_execute_returns_query_input_errors() {
        let ds = new_datasource();

        let cases = vec![
            PathBuf::from("/nonexistent/queries.json"),
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
        ];

        for path in cases {
            let result = execute(&ds, Command::Query { queries: Some(path.clone()) }).await;
            assert!(result.is_err(), "failed for case: {}", path.display());
        }

        ds.dispose();
    }

    #[tokio::test]
    async fn test_execute_health() {
        let ok = new_datasource();
        let failing = datasource::Datasource::new(
            Box::new(MockPresigner::failing(&[datasource::CANARY_KEY])),
            "dummy-bucket",
            Duration::from_secs(900),
        );

        assert!(execute(&ok, Command::Health).await.is_ok());
        assert!(execute(&failing, Command::Health).await.is_err());

        ok.dispose();
        failing.dispose();
    }
}
