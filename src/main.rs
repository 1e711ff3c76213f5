//! cruisecast - Cruise TV casting calls in your terminal
//!
//! Browse open castings, apply, and manage listings against the Cruise TV
//! backend.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cruisecast
//! cruisecast --admin
//!
//! # CLI mode (for automation)
//! cruisecast list --json
//! cruisecast apply 3 --name Jane --email j@x.com --role-fit "..." --experience "..."
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use cruisecast::app::{self, App, Effect, Outcome, Screen};
use cruisecast::carousel::CarouselTimer;
use cruisecast::cli::{Cli, Command, ExitCode, Output};
use cruisecast::config::Config;
use cruisecast::{commands, logging, ui, CastingClient};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match cli.config.as_deref() {
        Some(path) => match Config::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::load(), None),
    };

    if cli.is_cli_mode() {
        logging::init_cli(cli.quiet);
        if let Some(e) = config_error {
            tracing::warn!(error = %e, "using default configuration");
        }
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    }

    // TUI mode: launch interactive interface
    let _guard = logging::init_tui(config.log_level());
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default configuration");
    }
    run_tui(&cli, &config).await
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    let client = CastingClient::new(config.resolve_api_url(cli.api_url.as_deref()));

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, &client, &output).await,

        Some(Command::Create(args)) => commands::create_cmd(args, &client, &output).await,

        Some(Command::Update(cmd)) => commands::update_cmd(cmd, &client, &output).await,

        Some(Command::Delete(cmd)) => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            commands::delete_cmd(cmd, &client, &output, &mut input).await
        }

        Some(Command::Apply(cmd)) => commands::apply_cmd(cmd, &client, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: &Cli, config: &Config) -> Result<()> {
    let client = CastingClient::new(config.resolve_api_url(cli.api_url.as_deref()));
    let screen = if cli.admin {
        Screen::Admin
    } else {
        Screen::Listings
    };
    tracing::info!(base_url = client.base_url(), ?screen, "starting TUI");

    let mut terminal = init_terminal()?;
    let mut app = App::new(screen);

    let result = run_event_loop(&mut terminal, &mut app, &client, config.carousel_interval()).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Execute an effect on a background task, reporting back on `tx`
fn spawn_effect(client: &CastingClient, effect: Effect, tx: &UnboundedSender<Outcome>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = app::execute(&client, effect).await;
        let _ = tx.send(outcome);
    });
}

/// Main event loop - handles input, applies outcomes, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &CastingClient,
    carousel_interval: Duration,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = CarouselTimer::new(carousel_interval, tx.clone(), Outcome::CarouselTick);

    spawn_effect(client, app.start(), &tx);

    while app.running {
        // Timer only runs while the carousel is on screen and unpaused
        let mounted = app.screen == Screen::Listings;
        timer.set_paused(!mounted || app.carousel.paused);

        app.carousel.on_frame();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(effect) = app.handle_key(key) {
                        spawn_effect(client, effect, &tx);
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    app.set_pointer_over_carousel(ui::is_over_carousel(
                        area,
                        app.screen,
                        mouse.column,
                        mouse.row,
                    ));
                }
                _ => {}
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            if let Some(effect) = app.apply(outcome) {
                spawn_effect(client, effect, &tx);
            }
        }
    }

    timer.stop();
    tracing::info!("TUI exited");
    Ok(())
}
