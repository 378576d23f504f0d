//! newstui — terminal reader for The Guardian content search API.

use std::sync::Arc;

use clap::Parser;
use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use newstui::api::GuardianClient;
use newstui::app::App;
use newstui::browser::SystemBrowser;
use newstui::config::{data_dir, load_or_init_config, ConfigOverrides};
use newstui::connectivity::SocketProbe;
use newstui::credential::{delete_api_key, resolve_api_key, set_api_key};
use newstui::error::{NewsTuiError, Result};
use newstui::logging::init_logging;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Search term for this run (overrides the config file).
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// Earliest publication date, YYYY-MM-DD.
    #[arg(long)]
    from_date: Option<String>,

    /// Restrict results to a tag, e.g. politics/politics.
    #[arg(long, short = 't')]
    tag: Option<String>,

    /// Content search endpoint.
    #[arg(long)]
    endpoint: Option<String>,

    /// Store an API key in the system keyring and exit.
    #[arg(long, value_name = "KEY")]
    set_api_key: Option<String>,

    /// Remove the stored API key and exit.
    #[arg(long, conflicts_with = "set_api_key")]
    forget_api_key: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            query: self.query.clone(),
            from_date: self.from_date.clone(),
            tag: self.tag.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Without a log file the reader still runs; it just stays silent.
    let _log_guard = match data_dir().and_then(|dir| init_logging(&dir)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("newstui: logging disabled: {e}");
            None
        }
    };

    let config = load_or_init_config().with_overrides(cli.overrides());
    let host = config.endpoint_host()?;

    if let Some(key) = cli.set_api_key.as_deref() {
        set_api_key(&host, key.trim())?;
        println!("API key stored for {host}.");
        return Ok(());
    }
    if cli.forget_api_key {
        delete_api_key(&host)?;
        println!("API key removed for {host}.");
        return Ok(());
    }

    tracing::info!(
        endpoint = %config.endpoint,
        query = %config.query,
        from_date = %config.from_date,
        tag = ?config.tag,
        "starting"
    );
    let api_key = resolve_api_key(&host);
    let client = GuardianClient::new(&config, &api_key)?;
    let (probe_host, probe_port) = client
        .host_and_port()
        .ok_or_else(|| NewsTuiError::Config("Endpoint URL has no host or port".into()))?;
    let probe = Arc::new(SocketProbe::new(probe_host, probe_port));

    let mut app = App::new(config, client, probe, Box::new(SystemBrowser))?;
    ratatui::run(|terminal| run_app(terminal, &mut app)).map_err(NewsTuiError::Io)?;
    Ok(())
}

const TICK: Duration = Duration::from_millis(100);

/// Draw, deliver any finished load, and feed key presses to the app until it quits.
fn run_app(terminal: &mut DefaultTerminal, app: &mut App) -> std::io::Result<()> {
    while !app.should_quit {
        app.poll_load();
        terminal.draw(|f| app.draw(f))?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.on_key(key);
            }
        }
    }
    Ok(())
}
