use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use variant_console::config::Config;

#[derive(Debug, Parser)]
#[command(name = "variant-console", about = "Terminal console for a variant annotation job server")]
struct Cli {
    /// Job server base URL (overrides CONSOLE_SERVER_URL)
    #[arg(long)]
    server: Option<String>,

    /// Log file path; logs are never written to the terminal
    #[arg(long, default_value = "variant-console.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The alternate screen owns stdout, so tracing goes to a file.
    let log_dir = cli.log_file.parent().filter(|p| !p.as_os_str().is_empty());
    let log_name = cli
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "variant-console.log".into());
    let appender =
        tracing_appender::rolling::never(log_dir.unwrap_or(std::path::Path::new(".")), log_name);
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "variant_console=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }
    info!("Configuration loaded: {:?}", config.server);

    variant_console::tui::run(config).await
}
