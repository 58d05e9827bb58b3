//! Flora export server binary

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use flora_exporter::api::{run_server, ApiConfig, AppState};
use flora_exporter::store::FirestoreClient;

#[derive(Parser, Debug)]
#[command(name = "flora-server")]
#[command(version)]
#[command(about = "Flora biodiversity export server - Firestore to DwC-SMA Excel")]
#[command(long_about = r#"
Flora biodiversity export server

Reads campaign, station and occurrence documents from Firestore and reshapes
them into the three-sheet DwC-SMA reporting workbook.

Endpoints:
  GET /export?campana_id=<id>  - Generate a workbook, returns a download URL
  GET /download/<fname>        - Download a generated workbook
  GET /health                  - Health check

Example usage:
  flora-server --project-id my-project
  flora-server --host 0.0.0.0 --port 3000 \
    --template ./FormatoBiodiversidadMonitoreoYLineaBase_v5.2.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "FLORA_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "FLORA_PORT")]
    port: u16,

    /// Firestore project id
    #[arg(long, env = "FLORA_FIRESTORE_PROJECT")]
    project_id: String,

    /// Firestore API key (omit when the database allows unauthenticated reads)
    #[arg(long, env = "FLORA_FIRESTORE_API_KEY")]
    api_key: Option<String>,

    /// Template workbook path
    #[arg(
        long,
        default_value = "FormatoBiodiversidadMonitoreoYLineaBase_v5.2.xlsx",
        env = "FLORA_TEMPLATE"
    )]
    template: PathBuf,

    /// Directory generated workbooks are saved to
    #[arg(long, default_value = "/tmp/downloads", env = "FLORA_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Absolute base URL for download links (behind a proxy / on https)
    #[arg(long, env = "FLORA_PUBLIC_URL")]
    public_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        public_url: args.public_url,
    };

    std::fs::create_dir_all(&args.output_dir)?;

    let state = AppState {
        store: Arc::new(FirestoreClient::new(args.project_id, args.api_key)),
        template_path: args.template,
        output_dir: args.output_dir,
        base_url: config.base_url(),
    };

    run_server(config, state).await
}
