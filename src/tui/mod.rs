//! Interactive full-screen frontend.
//!
//! Event loop over crossterm: draw a frame, block on the next event,
//! update state, repeat. Searches run synchronously inside the loop, so
//! there is never more than one in flight.

mod state;
mod term;
mod view;

use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use tgrep::engine::Engine;

use state::{Action, App};
use term::TerminalGuard;

pub fn run(engine: Engine) -> io::Result<()> {
    let _guard = TerminalGuard::new()?;
    let (width, height) = terminal::size()?;
    let mut app = App::new(engine, width, height);
    let mut stdout = io::stdout();

    loop {
        view::draw(&mut stdout, &app)?;
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                match app.handle_key(key) {
                    Action::Quit => break,
                    Action::Search => {
                        // Show the searching status before blocking.
                        app.begin_search();
                        view::draw(&mut stdout, &app)?;
                        app.run_search();
                    }
                    Action::Continue => {}
                }
            }
            Event::Resize(w, h) => app.resize(w, h),
            _ => {}
        }
    }
    Ok(())
}
