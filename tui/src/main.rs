//! Claim Saathi TUI Entry Point
//!
//! Launches the Claim Saathi chat widget in the terminal.
//!
//! Usage:
//!   saathi-tui [OPTIONS]
//!
//! Options:
//!   --endpoint <URL>        Assistant endpoint (default: http://localhost:5005/api/ask-gemini)
//!   --config <PATH>         Config file (default: ~/.config/claim-saathi/widget.toml)
//!   --user-id <ID>          Signed-in user id
//!   --storage-dir <DIR>     Session storage directory
//!   --timeout-secs <SECS>   Request timeout (default: none)
//!   --log-file <PATH>       Log file (default: ~/.local/share/claim-saathi/saathi-tui.log)

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use chat_core::{
    default_config_path, load_config_from_path, AuthContext, ChatWidget, ConfigOverrides,
    HttpAssistant, JsonFileStorage, MemoryStorage, SessionStorage, WidgetConfig,
};
use saathi_tui::{logging, App};

/// Claim Saathi - AI insurance assistant chat widget
#[derive(Parser, Debug)]
#[command(name = "saathi-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Assistant endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Signed-in user id (takes precedence over session storage)
    #[arg(long)]
    user_id: Option<String>,

    /// Directory holding session storage files (user_data.json)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Append logs to this file (default: under the user data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
            storage_dir: self.storage_dir.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_file = logging::init(args.log_file.as_deref())?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: saathi-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH ran without -t.");
        std::process::exit(1);
    }

    tracing::debug!(log_file = ?log_file, "Logging initialized");

    let config = load_widget_config(&args)?;
    let widget = build_widget(&config).await?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(widget);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Defaults, then the config file, then the environment, then the CLI
fn load_widget_config(args: &Args) -> anyhow::Result<WidgetConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("loading configuration")?;
    args.overrides()
        .apply(&mut config)
        .context("applying command-line options")?;

    tracing::info!(
        source = %config.source(),
        endpoint = %config.endpoint,
        timeout = ?config.request_timeout,
        "Configuration loaded"
    );
    Ok(config)
}

/// Create the widget and resolve the user id
async fn build_widget(config: &WidgetConfig) -> anyhow::Result<ChatWidget<HttpAssistant>> {
    let backend = HttpAssistant::from_config(config).context("creating HTTP client")?;

    let storage: Box<dyn SessionStorage> =
        match config.storage_dir.clone().or_else(JsonFileStorage::default_dir) {
            Some(dir) => Box::new(JsonFileStorage::new(dir)),
            None => {
                tracing::warn!("No session storage directory; using in-memory storage");
                Box::new(MemoryStorage::new())
            }
        };

    let auth = config
        .user_id
        .clone()
        .map_or_else(AuthContext::anonymous, AuthContext::signed_in);

    let mut widget = ChatWidget::new(backend);
    widget.mount(&auth, storage.as_ref()).await;
    Ok(widget)
}
