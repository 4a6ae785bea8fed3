//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader on
//! tokio's blocking pool that forwards them over a channel, so the main loop
//! only ever awaits the receiver.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a reader that polls the terminal and sends events through the
/// returned channel.  `poll_rate` bounds how long the reader takes to notice
/// the receiver was dropped.
pub fn spawn_event_reader(poll_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(poll_rate) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::error!(error = %e, "terminal poll failed");
                    break;
                }
            }
            let app_event = match event::read() {
                // Key releases are reported on some platforms; only presses
                // and repeats drive the app.
                Ok(CtEvent::Key(k)) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::error!(error = %e, "terminal read failed");
                    break;
                }
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
