// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::info;

// How long to wait for input before checking on in-flight requests
const POLL_INTERVAL: Duration = Duration::from_millis(80);

pub async fn run_tui(mut app: App, mouse_enabled: bool) -> anyhow::Result<()> {
    // Initial load
    app.controller.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    info!("TUI closed");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        app.poll_completions();
        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.next_item(),
                    MouseEventKind::ScrollUp => app.previous_item(),
                    _ => {}
                },
                _ => {}
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }

        // Let spawned requests make progress between frames
        tokio::task::yield_now().await;
    }
}

/// Map a key press to an intent for the current input mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
            KeyCode::Char(c) => app.search_push(c),
            KeyCode::Backspace => app.search_pop(),
            _ => {}
        },
        InputMode::Category => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
            KeyCode::Char(c) => app.category_push(c),
            KeyCode::Backspace => app.category_pop(),
            _ => {}
        },
        InputMode::Adding => match key.code {
            KeyCode::Esc => app.enter_normal_mode(),
            KeyCode::Enter => app.submit_form(),
            KeyCode::Tab | KeyCode::Down => app.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.form.previous_field(),
            KeyCode::Char(c) => app.form.push_char(c),
            KeyCode::Backspace => app.form.pop_char(),
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char('/') => app.enter_search_mode(),
            KeyCode::Char('c') => app.enter_category_mode(),
            KeyCode::Char('a') => app.enter_add_mode(),
            KeyCode::Char('D') => app.cycle_downloaded_filter(),
            KeyCode::Char('x') => app.reset_filters(),
            KeyCode::Char('r') => app.controller.refresh(),
            KeyCode::Char('j') | KeyCode::Down => app.next_item(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_item(),
            KeyCode::Char('t') | KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            _ => {}
        },
    }
}
