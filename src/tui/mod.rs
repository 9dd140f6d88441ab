//! Terminal UI for playing against the remote service.

mod input;
mod ui;
mod view;

pub use input::{KeyAction, action_for, move_cursor};
pub use view::TuiPresenter;

use crate::config::ClientConfig;
use crate::games::tictactoe::Cell;
use crate::machine::{GameStateMachine, InputEvent};
use crate::sync::{HttpSyncClient, SyncClient};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Runs the terminal client until the player quits.
pub async fn run_tui(config: ClientConfig, computer_first: bool) -> Result<()> {
    // Log to a file so output does not corrupt the screen.
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting Strictly Remote TUI");

    let client = HttpSyncClient::new(config.server_url(), config.request_timeout())?;
    let presenter = TuiPresenter::new(config.highlight_stagger());
    let mut machine = GameStateMachine::new(config.session(), client, presenter);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut machine, &config, computer_first).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Event loop: draw, read one key, poll the service when due.
#[instrument(skip_all)]
async fn run_game<C: SyncClient>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    machine: &mut GameStateMachine<C, TuiPresenter>,
    config: &ClientConfig,
    computer_first: bool,
) -> Result<()> {
    // Load failures are shown on screen; polling retries them.
    if machine.start().await.is_ok() && computer_first {
        report(machine.handle_computer_move().await);
    }

    let mut cursor = Cell::ALL[4];
    let mut last_poll = Instant::now();

    loop {
        let state = machine.state();
        terminal.draw(|f| ui::draw(f, machine.presenter(), machine.session(), &state, cursor))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            let event = match action_for(cursor, key.code) {
                KeyAction::Cursor(next) => {
                    cursor = next;
                    None
                }
                KeyAction::Click(cell) => {
                    cursor = cell;
                    Some(InputEvent::CellClicked(cell))
                }
                KeyAction::Restart => Some(InputEvent::Restart),
                KeyAction::ComputerMove => Some(InputEvent::ComputerMove),
                KeyAction::Refresh => Some(InputEvent::Refresh),
                KeyAction::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                KeyAction::None => None,
            };
            if let Some(event) = event {
                debug!(?event, "Dispatching input");
                report(machine.handle_event(event).await);
                last_poll = Instant::now();
            }
        }

        if last_poll.elapsed() >= config.poll_interval() {
            report(machine.refresh().await);
            last_poll = Instant::now();
        }
    }
}

/// Errors are already on screen through the presenter; only log them here.
fn report<T: std::fmt::Debug>(result: Result<T, crate::error::GameError>) {
    match result {
        Ok(transition) => debug!(?transition, "Input handled"),
        Err(e) => warn!(error = %e, "Input failed"),
    }
}
