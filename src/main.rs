use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use faqchat::core::config::{self, CliOverrides, FaqchatConfig};
use faqchat::responder::http::HttpResponder;
use faqchat::server::{self, FaqBook};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

#[derive(Parser)]
#[command(name = "faqchat", about = "Terminal chat client for an FAQ bot")]
struct Args {
    /// Chat endpoint URL (overrides FAQCHAT_ENDPOINT and the config file)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the FAQ backend the client talks to
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:5000
        #[arg(short, long)]
        bind: Option<String>,
        /// JSON file of FAQ entries (defaults to the bundled set)
        #[arg(short, long)]
        faqs: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let mut overrides = CliOverrides {
        endpoint: args.endpoint,
        ..Default::default()
    };
    let serving = match args.command {
        Some(Command::Serve { bind, faqs }) => {
            let _ = TermLogger::init(
                LevelFilter::Info,
                log_config,
                TerminalMode::Mixed,
                ColorChoice::Auto,
            );
            overrides.bind = bind;
            overrides.faqs_file = faqs;
            true
        }
        None => {
            // The terminal belongs to the TUI, so log to a file
            if let Ok(log_file) = File::create("faqchat.log") {
                let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
            }
            false
        }
    };

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        FaqchatConfig::default()
    });
    let resolved = config::resolve(&file_config, &overrides);

    if serving {
        let book = match &resolved.faqs_file {
            Some(path) => FaqBook::load(path),
            None => FaqBook::bundled(),
        }
        .map_err(std::io::Error::other)?;
        log::info!("faqchat backend starting on {}", resolved.bind);
        return server::serve(&resolved.bind, book).await;
    }

    log::info!("faqchat starting up against {}", resolved.endpoint);
    let responder = Arc::new(HttpResponder::new(resolved.endpoint.clone()));
    faqchat::tui::run(responder, &resolved)
}
