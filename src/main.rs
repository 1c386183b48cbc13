use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logdeck::app::App;
use logdeck::cli::{Cli, Commands, ConfigAction};
use logdeck::dispatch::{FetchOutcome, ThreadDispatcher};
use logdeck::fetcher::HttpLogFetcher;
use logdeck::handlers::input;
use logdeck::logging::{self, Verbosity};
use logdeck::query::DateWindow;
use logdeck::view::{LogsView, ViewSettings};
use logdeck::{cmd, config, signal, tui};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Upper bound on how long the loop waits for input before draining fetch results.
const INPUT_POLL_DURATION_MS: u64 = 50;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config {
        action: ConfigAction::Show,
    }) = &cli.command
    {
        if let Err(code) = cmd::config::show(cli.config.as_deref()) {
            std::process::exit(code);
        }
        return Ok(());
    }

    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    if let Some(path) = cli.log_file.clone().or_else(logging::default_log_path) {
        // Diagnostics are optional; the viewer still works without them.
        if let Err(e) = logging::init(verbosity, &path) {
            eprintln!("Warning: {:#}", e);
        }
    }

    let discovery = config::discover();
    let mut cfg = match config::load(&discovery, cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprint!("{}", e);
            std::process::exit(1);
        }
    };

    if let Some(url) = cli.url {
        cfg.url = url;
    }
    if let Some(page_size) = cli.page_size {
        cfg.page_size = page_size;
    }
    if let Err(message) = config::validate_url(&cfg.url) {
        bail!(message);
    }

    let window = DateWindow {
        since: cli.since,
        until: cli.until,
    };
    if let (Some(since), Some(until)) = (window.since, window.until) {
        if since > until {
            bail!("--since must not be later than --until");
        }
    }

    tracing::info!(url = %cfg.url, page_size = cfg.page_size, "starting");

    let fetcher = HttpLogFetcher::new(&cfg.url).context("Failed to create HTTP client")?;
    let (dispatcher, outcomes) = ThreadDispatcher::new(Arc::new(fetcher));

    let settings = ViewSettings {
        page_size: cfg.page_size,
        debounce: cfg.suggest_debounce,
        window,
    };
    let view =
        LogsView::new(dispatcher, settings).with_filters(cli.level, cli.query.unwrap_or_default());
    let mut app = App::new(view);

    let shutdown = signal::install_shutdown_flag().context("Failed to install signal handlers")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &outcomes, &shutdown);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "exiting on error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<ThreadDispatcher>,
    outcomes: &Receiver<FetchOutcome>,
    shutdown: &AtomicBool,
) -> Result<()> {
    app.view.mount();

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        while let Ok(outcome) = outcomes.try_recv() {
            app.on_outcome(outcome);
        }
        app.view.tick(Instant::now());

        terminal.draw(|f| tui::render(f, app))?;

        let timeout = poll_timeout(app.view.next_deadline(), Instant::now());
        if crossterm_event::poll(timeout)? {
            let events = match crossterm_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_input_event(key, app)
                }
                Event::Mouse(mouse) => input::handle_mouse_event(mouse),
                _ => Vec::new(),
            };
            let now = Instant::now();
            for event in events {
                app.apply_event(event, now);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Wait for input no longer than the poll interval or the next timer.
fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    let poll = Duration::from_millis(INPUT_POLL_DURATION_MS);
    match deadline {
        Some(deadline) => poll.min(deadline.saturating_duration_since(now)),
        None => poll,
    }
}
