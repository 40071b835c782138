//! Event bus for diffnote.
//!
//! Terminal input and timer ticks are normalised into a single `AppEvent` enum
//! and sent over a tokio unbounded MPSC channel. The main loop receives from
//! this channel and handles one event completely before taking the next.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms, about 30 FPS): triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms, 4 Hz): expires status-bar flash messages.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Render cadence.
pub const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Logic cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// All events the application can receive.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] to avoid
    /// double-firing on Windows, which synthesises both press and release for
    /// every keystroke.
    Key(KeyEvent),
    /// A mouse event from the terminal (scroll wheel is the only one used).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (4 Hz / 250 ms).
    Tick,
    /// Render tick: triggers a `terminal.draw()` call.
    Render,
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Send half, handed to [`spawn_event_task`].
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half, owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    ///
    /// The producers (terminal input and two timers) run at a bounded rate
    /// and the main loop always keeps up, so no backpressure is needed.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that drives the unified event channel.
///
/// The task exits once the receiver is dropped. Crossterm input is polled via
/// `EventStream`; `reader.next().fuse()` keeps `tokio::select!` from polling a
/// completed future if the stream ends. Only `KeyEventKind::Press` key events
/// are forwarded.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(TICK_INTERVAL);
        let mut render_interval = interval(RENDER_INTERVAL);
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let event = tokio::select! {
                _ = tick_tick => Some(AppEvent::Tick),
                _ = render_tick => Some(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Some(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => Some(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => Some(AppEvent::Mouse(mouse)),
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal input error");
                        None
                    }
                    None => break,
                },
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
}
