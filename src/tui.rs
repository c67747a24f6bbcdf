//! Event loop wiring keyboard input and fetch completions to the state
//! machine. All state mutation happens on this task; fetches run in
//! spawned tasks and report back over the channel.

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::app::{Converter, Dropdown, Effect, Event, Side};
use crate::core::RateService;
use crate::terminal::Tui;
use crate::ui;

pub async fn run_loop(terminal: &mut Tui, service: Arc<dyn RateService>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = Converter::new();
    let mut events = EventStream::new();

    // Initial fetch so the displayed rate matches the default pair.
    dispatch(app.refresh(), &service, &tx);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key(&mut app, key, &service, &tx) {
                            break;
                        }
                    }
                    Some(Ok(_)) => {} // resizes are picked up on the next draw
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Some(event) = rx.recv() => app.apply(event),
        }
    }

    Ok(())
}

/// Handles one key press. Returns true when the application should quit.
fn handle_key(
    app: &mut Converter,
    key: KeyEvent,
    service: &Arc<dyn RateService>,
    tx: &mpsc::UnboundedSender<Event>,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return true,
            KeyCode::Char('f') => app.toggle_dropdown(Side::From),
            KeyCode::Char('t') => app.toggle_dropdown(Side::To),
            _ => {}
        }
        return false;
    }

    if key.code == KeyCode::Esc {
        return true;
    }

    match app.dropdown {
        Dropdown::Closed => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('f') => app.toggle_dropdown(Side::From),
            KeyCode::Char('t') => app.toggle_dropdown(Side::To),
            KeyCode::Char('s') => dispatch(app.swap(), service, tx),
            KeyCode::Char('r') => dispatch(app.refresh(), service, tx),
            KeyCode::Enter => {
                if let Some(effect) = app.submit() {
                    dispatch(effect, service, tx);
                }
            }
            KeyCode::Backspace => app.pop_amount(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.push_amount(c),
            _ => {}
        },
        // A dropdown is open: keys drive search and selection.
        _ => match key.code {
            KeyCode::Up => app.cursor_up(),
            KeyCode::Down => app.cursor_down(),
            KeyCode::Enter => {
                if let Some(effect) = app.select_cursor() {
                    dispatch(effect, service, tx);
                }
            }
            KeyCode::Backspace => app.pop_search(),
            KeyCode::Char(c) => app.push_search(c),
            _ => {}
        },
    }

    false
}

/// Executes an effect on a spawned task and reports the completion back.
pub fn dispatch(
    effect: Effect,
    service: &Arc<dyn RateService>,
    tx: &mpsc::UnboundedSender<Event>,
) {
    let service = Arc::clone(service);
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = match effect {
            Effect::FetchRate { from, to } => {
                Event::RateFetched(service.fetch_rate(from, to).await)
            }
            Effect::Convert { from, to, amount } => {
                Event::Converted(service.convert(from, to, amount).await)
            }
        };
        // The receiver only drops on shutdown.
        let _ = tx.send(event);
    });
}
