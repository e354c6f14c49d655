use super::{App, rendering};
use crate::event_handler::EventHandler;

use folio_core::{Session, SessionEvent};

use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Result, Stdout};
use std::{panic, time::Duration};
use tokio::time::{Interval, MissedTickBehavior};

/// Input poll and animation interval
pub const TICK: Duration = Duration::from_millis(80);

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        original_hook(panic_info);
    }));

    let result = drive(app, &mut terminal).await;

    app.session.teardown();
    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    result
}

/// What woke the loop up
#[derive(Debug)]
enum Wakeup {
    Tick,
    Session(SessionEvent),
}

/// Wait for the next tick or timer event. The ticker keeps its own
/// schedule, so a steady stream of session events cannot starve input.
async fn next_wakeup(ticker: &mut Interval, session: &mut Session) -> Wakeup {
    tokio::select! {
        _ = ticker.tick() => Wakeup::Tick,
        event = session.next_event() => Wakeup::Session(event),
    }
}

async fn drive(app: &mut App, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.hide_cursor()?;
    terminal.clear()?;
    app.session.start();
    rendering::draw(app, terminal)?;

    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !app.should_exit {
        let wakeup = next_wakeup(&mut ticker, &mut app.session).await;
        match wakeup {
            Wakeup::Tick => {
                let mut redraw = app.tick();
                if let Some(event) = EventHandler::read()? {
                    redraw |= app.handle_event(event);
                }
                if redraw && !app.should_exit {
                    rendering::draw(app, terminal)?;
                }
            }
            Wakeup::Session(event) => {
                if app.handle_session_event(event) {
                    rendering::draw(app, terminal)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Config, Portfolio, Script, ScriptEntry, Speaker};
    use std::time::Duration;
    use tokio::time::Instant;

    fn chatty_session() -> Session {
        let mut portfolio = Portfolio::builtin().unwrap();
        let entries = (0..100).map(|i| ScriptEntry::text(Speaker::Visitor, format!("msg {i}"), 20)).collect();
        portfolio.script = Script::new(entries).unwrap();
        Session::new(portfolio, &Config::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_keep_pace_with_fast_events() {
        let mut session = chatty_session();
        session.start();
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let start = Instant::now();
        let (mut ticks, mut events) = (0, 0);
        while start.elapsed() < Duration::from_millis(1000) {
            match next_wakeup(&mut ticker, &mut session).await {
                Wakeup::Tick => ticks += 1,
                Wakeup::Session(event) => {
                    session.apply(event);
                    events += 1;
                }
            }
        }

        assert!(events >= 45);
        assert!(ticks >= 12);
    }
}
