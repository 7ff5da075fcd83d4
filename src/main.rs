use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;

use typeahead::app::config::{self, Config};
use typeahead::app::{r#loop::run_loop, state::AppState};
use typeahead::domain::search::SearchFacade;
use typeahead::infrastructure::{
    cache::ExpiringCache,
    github::GitHubClient,
    store::{FileStore, KeyValueStore, MemoryStore},
};

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

/// The terminal belongs to the UI, so log records go to a file.
fn setup_logging(dir: Option<&Path>) -> Result<()> {
    let Some(dir) = dir else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join("typeahead.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let env = env_logger::Env::default()
        .filter_or("TYPEAHEAD_LOG", std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    let cache_dir = config::cache_dir();
    if let Err(e) = setup_logging(cache_dir.as_deref()) {
        eprintln!("logging disabled: {e:#}");
    }

    // Everything that can fail on bad configuration runs before the
    // terminal switches to raw mode.
    let config = Config::load();
    let store: Box<dyn KeyValueStore> = match &cache_dir {
        Some(dir) => {
            let store = FileStore::for_origin(dir, &config.api_base_url);
            log::debug!("response cache at {}", store.path().display());
            Box::new(store)
        }
        None => {
            log::warn!("no home directory, responses are cached in memory only");
            Box::new(MemoryStore::new())
        }
    };
    let cache = ExpiringCache::new(store, config.cache_ttl());
    log::debug!("cache entries expire after {:?}", cache.ttl());
    let client = Arc::new(GitHubClient::new(
        &config.api_base_url,
        config.token.clone(),
        cache,
    )?);
    log::info!(
        "starting against {} (authenticated: {})",
        client.origin(),
        config.token.is_some()
    );
    let app_state = AppState::new(&config, client.origin());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, client, config.debounce()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:#}");
        println!("{:?}", err);
    }

    Ok(())
}
