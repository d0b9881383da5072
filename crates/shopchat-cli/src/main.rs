//! shopchat CLI: Command-line interface for the shop assistant chat widget

use clap::{Parser, Subcommand};
use shopchat_engine::{
    ChatService, ChatWidget, Config, HttpChatService, Resolution, ServiceError,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Chat with the shop assistant from your terminal
#[derive(Parser)]
#[command(name = "shopchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Base URL of the chat service (overrides the config file)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Where to write logs in TUI mode (default: shopchat.log in the temp dir)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Send {
        /// The message to send
        message: String,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

const DEFAULT_CONFIG_PATH: &str = ".shopchat/config.json";

const DEFAULT_LOG_FILTER: &str = "info,shopchat_engine=debug,shopchat_tui=debug";

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli.config, cli.url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            let log_path = cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join("shopchat.log"));
            if let Err(e) = cmd_tui(&config, &log_path) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { message }) => {
            init_stderr_logging();
            match cmd_send(&config, &message) {
                Ok(code) => std::process::exit(code),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Config { json }) => {
            cmd_config(&config, json);
        }
    }
}

fn load_config(path: &Path, url: Option<&str>) -> Result<Config, shopchat_engine::ConfigError> {
    let config = Config::load_or_default(path)?;
    Ok(match url {
        Some(url) => config.with_base_url(url),
        None => config,
    })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Log to a file so output never lands on the TUI.
fn init_file_logging(path: &Path) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_tui(config: &Config, log_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    init_file_logging(log_path)?;

    let service: Arc<dyn ChatService> = Arc::new(HttpChatService::from_config(config)?);
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(shopchat_tui::run_tui(config, service))
}

/// Returns the process exit code: 0 for a reply, 1 for the fallback, 2 for a blank message.
fn cmd_send(config: &Config, message: &str) -> Result<i32, Box<dyn std::error::Error>> {
    let service = HttpChatService::from_config(config)?;
    tracing::debug!(endpoint = %service.endpoint(), "sending one-shot message");

    let mut widget = ChatWidget::new();
    widget.on_draft_change(message);

    let rt = tokio::runtime::Runtime::new()?;
    let Some(resolution) = rt.block_on(widget.send(&service)) else {
        eprintln!("Nothing to send: message is blank");
        return Ok(2);
    };

    if let Some(reply) = widget.log().last() {
        println!("{}", reply.text());
    }

    Ok(match resolution {
        Resolution::Replied => 0,
        Resolution::Fallback | Resolution::Ignored => 1,
    })
}

fn cmd_config(config: &Config, json: bool) {
    let output = if json {
        serde_json::to_string_pretty(config).map_err(|e| e.to_string())
    } else {
        config_summary(config).map_err(|e| e.to_string())
    };

    match output {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    }
}

/// Human-readable view of the effective configuration.
fn config_summary(config: &Config) -> Result<String, ServiceError> {
    let service = HttpChatService::from_config(config)?;
    let timeout = config
        .request_timeout_secs
        .map_or_else(|| "transport default".to_string(), |secs| format!("{secs}s"));

    Ok([
        format!("Chat service: {}", service.endpoint()),
        format!("Title:        {}", config.title),
        format!("Greeting:     {}", config.greeting),
        format!("Placeholder:  {}", config.placeholder),
        format!("Timeout:      {timeout}"),
    ]
    .join("\n"))
}
