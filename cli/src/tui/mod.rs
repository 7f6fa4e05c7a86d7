pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::runtime::Handle;
use tracing::{error, info};

use geodo_core::{ApiClient, FileSessionStore, SessionContext};

use crate::tui::app::{App, InputMode};

const TICK: Duration = Duration::from_millis(100);

pub fn run(runtime: Handle, client: ApiClient, session: SessionContext, store: FileSessionStore) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(api = %client.base_url(), "tui started");
    let mut app = App::new(runtime, client, session, store);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "tui loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.drain_events();

        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_status(),
                KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
                KeyCode::Char('a') => app.enter_mode(InputMode::Adding),
                KeyCode::Char('e') | KeyCode::Char('m') => app.enter_mode(InputMode::Modifying),
                KeyCode::Char('p') => app.cycle_priority(),
                KeyCode::Char('f') => app.cycle_done(),
                KeyCode::Char('r') => app.refresh(),
                KeyCode::Char('l') => app.load_location(),
                KeyCode::Char('L') => app.enter_mode(InputMode::Locating),
                KeyCode::Char('x') => app.clear_location(),
                KeyCode::Char('o') => app.logout(),
                _ => {}
            },
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
                _ => app.exit_input_mode(),
            },
            InputMode::Login if key.code == KeyCode::Esc => return Ok(()),
            InputMode::Login | InputMode::Adding | InputMode::Modifying | InputMode::Locating => {
                match key.code {
                    KeyCode::Enter => app.submit_command(),
                    KeyCode::Esc => app.exit_input_mode(),
                    KeyCode::Char(c) => app.input_char(c),
                    KeyCode::Backspace => app.delete_char(),
                    KeyCode::Left => app.move_cursor_left(),
                    KeyCode::Right => app.move_cursor_right(),
                    _ => {}
                }
            }
        }
    }
}
