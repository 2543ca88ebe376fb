use anyhow::Context;
use clap::{Parser, Subcommand};
use eduassist_backend_api::{build_router, ApiDoc, AppState};
use eduassist_config::load as load_config;
use eduassist_runtime::{shutdown_signal, telemetry, RelayServices};
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;

#[derive(Parser)]
#[command(name = "eduassist-server")]
#[command(about = "EduAssist relay for doubt answers, translation and transcription")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay (default)
    Serve,
    /// Print the OpenAPI document to stdout
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Openapi => print_openapi(),
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting EduAssist relay");

    let config = load_config().context("failed to load configuration")?;

    let services =
        RelayServices::initialise(&config).context("failed to initialise relay services")?;

    let state = AppState::with_access_token(services.orchestrator, services.access_token)
        .with_max_body_bytes(services.max_body_bytes);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("relay shut down");
    Ok(())
}

fn print_openapi() -> anyhow::Result<()> {
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialise OpenAPI document")?;
    println!("{document}");
    Ok(())
}
