use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use andy_console::logging::{self, LogTarget};
use andy_console::{
    app, events, ui, App, ConsoleConfig, DataSource, FileFetcher, HttpFetcher, StatusFetcher,
    StatusPoller, TelemetryPanel,
};

#[derive(Parser, Debug)]
#[command(name = "andy-console")]
#[command(about = "Operator console for ANDY-OS system telemetry")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Read snapshots from a JSON file instead of the backend
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Poll interval in milliseconds (overrides configuration)
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Skip poll ticks while a request is still running
    #[arg(long)]
    suppress_overlap: bool,

    /// Log file for interactive sessions (overrides configuration)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch one snapshot, write the settled frame as JSON, and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        logging::init(LogTarget::Stderr, &config.log_filter)?;
        return export_to_file(&args, &config, export_path);
    }

    logging::init(LogTarget::File(&config.log_file), &config.log_filter)?;
    info!(?config, "starting andy-console");

    let fetcher = build_fetcher(&args, &config)?;

    // Poller tasks run on the runtime; the UI loop stays on this thread
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let source = StatusPoller::from_arc(fetcher)
        .interval(config.poll_interval())
        .suppress_overlap(config.suppress_overlap)
        .spawn();

    let result = run_tui(Box::new(source), config.poll_interval());
    if let Err(ref e) = result {
        error!(error = %e, "console exited with error");
    }
    result
}

/// Layer command-line flags over the loaded configuration.
fn resolve_config(args: &Args) -> Result<ConsoleConfig> {
    let mut config = ConsoleConfig::load(args.config.as_deref())?;

    if let Some(ref endpoint) = args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(interval_ms) = args.interval_ms {
        config.poll_interval_ms = interval_ms;
    }
    if args.suppress_overlap {
        config.suppress_overlap = true;
    }
    if let Some(ref log_file) = args.log_file {
        config.log_file = log_file.clone();
    }

    config.validate()?;
    Ok(config)
}

fn build_fetcher(args: &Args, config: &ConsoleConfig) -> Result<Arc<dyn StatusFetcher>> {
    match args.file {
        Some(ref path) => Ok(Arc::new(FileFetcher::new(path))),
        None => {
            let fetcher = HttpFetcher::new(&config.endpoint, config.request_timeout())
                .with_context(|| format!("failed to set up client for {}", config.endpoint))?;
            Ok(Arc::new(fetcher))
        }
    }
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, transition: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, transition);
    app.reload_data(Instant::now());

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Stop animations, then drop the app to stop the poller
    app.shutdown();
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(app.frame_timeout())? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // New targets first, then step every tracker to the same instant
        let now = Instant::now();
        app.reload_data(now);
        app.tick(now);
    }

    Ok(())
}

/// Fetch one snapshot and export the fully settled frame
fn export_to_file(args: &Args, config: &ConsoleConfig, export_path: &Path) -> Result<()> {
    let fetcher = build_fetcher(args, config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let snapshot = rt
        .block_on(fetcher.fetch())
        .with_context(|| format!("failed to fetch from {}", fetcher.description()))?;

    let panel = TelemetryPanel::settled(&snapshot, config.poll_interval());
    app::write_export(
        export_path,
        fetcher.description(),
        snapshot.status,
        snapshot.mode,
        &panel.frame(),
    )?;

    println!("Exported telemetry frame to: {}", export_path.display());
    Ok(())
}
