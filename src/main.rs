use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ibex::{config, server};

#[derive(Parser)]
#[command(name = "ibex")]
#[command(about = "AI security companion chat gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat gateway
    Serve {
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Show the resolved configuration
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = config::load()?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            server::run(config).await
        }
        Commands::Status => {
            let config = config::load()?;
            println!("ibex v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "model endpoint: {}",
                config
                    .model
                    .endpoint
                    .as_deref()
                    .unwrap_or("(none - fallback mode)")
            );
            println!(
                "context: {} turns, {} chars per excerpt",
                config.context.capacity, config.context.excerpt_chars
            );
            println!("bind: {}:{}", config.server.bind, config.server.port);
            Ok(())
        }
    }
}
