//! `relay` — serve the Lambda relay gateway or drive it from the terminal.

mod form;

use clap::{Parser, Subcommand};
use relay_client::{render, FormClient, FormState, DEFAULT_BACKEND_URL};
use relay_core::RelayConfig;
use relay_gateway::GatewayServer;
use relay_lambda::{Credentials, LambdaInvoker};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "relay.toml";

#[derive(Parser)]
#[command(name = "relay", version, about = "Lambda relay — HTTP gateway and form client")]
struct Cli {
    /// Path to config file (default: relay.toml, optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the forwarding gateway
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Interactive form: prompt for a value and submit it
    Form {
        /// Gateway base URL to pre-fill
        #[arg(long, default_value = DEFAULT_BACKEND_URL)]
        url: String,
    },
    /// Submit a single value and print the outcome
    Invoke {
        /// Gateway base URL
        #[arg(long, default_value = DEFAULT_BACKEND_URL)]
        url: String,
        /// Value to send
        value: String,
    },
}

fn init_tracing(json: bool, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            init_tracing(true, "info");

            let (path, required) = match cli.config {
                Some(path) => (path, true),
                None => (PathBuf::from(DEFAULT_CONFIG), false),
            };
            let config = RelayConfig::load(&path, required)?;

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let credentials = Credentials::from_env();
            if credentials.is_none() {
                warn!("No AWS credentials found in environment or shared files; every invocation will fail");
            }

            info!(
                function = %config.lambda.function_name,
                region = %config.lambda.region,
                endpoint = %config.lambda.endpoint(),
                timeout_secs = config.lambda.timeout_secs,
                "Forwarding to Lambda function"
            );
            let invoker = Arc::new(LambdaInvoker::new(config.lambda, credentials)?);
            let app = GatewayServer::build(invoker, &config.cors);

            let addr = format!("{host}:{port}");
            info!(%addr, "Starting relay gateway");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            relay_gateway::serve(listener, app).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Form { url } => {
            init_tracing(false, "warn");
            let client = FormClient::new()?;
            let form = FormState {
                backend_url: url,
                value: String::new(),
            };
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            form::run(&client, form, stdin, &mut std::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Invoke { url, value } => {
            init_tracing(false, "warn");
            let client = FormClient::new()?;
            let outcome = client
                .submit(&FormState {
                    backend_url: url,
                    value,
                })
                .await;
            println!("{}", render(&outcome));
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
