pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use app::{InputMode, Tab};

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let events = EventHandler::new(250); // 250ms tick

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next() {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.input_mode == InputMode::Help {
        // Any key exits help
        app.dismiss_help();
        return;
    }

    // Keys shared by every tab
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.toggle_tab();
            return;
        }
        KeyCode::Char('?') => {
            app.show_help();
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Jobs => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            // Jump straight to the scenario tab for the selected row
            KeyCode::Enter | KeyCode::Char('s') => app.tab = Tab::Scenario,
            _ => {}
        },
        Tab::Scenario => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.next_param(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_param(),
            KeyCode::Char('h') | KeyCode::Left => app.adjust_param(-1),
            KeyCode::Char('l') | KeyCode::Right => app.adjust_param(1),
            KeyCode::Enter => app.run_selected_scenario(),
            KeyCode::Char('x') => app.reset_params(),
            _ => {}
        },
        Tab::TensionMap => match key.code {
            KeyCode::Char('f') => app.cycle_risk_filter(),
            _ => {}
        },
    }
}
