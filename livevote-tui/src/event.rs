use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Terminal events
#[derive(Debug, Clone)]
pub enum Event {
    /// Periodic tick, drives toast expiry
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resize
    Resize,
}

/// Polls crossterm events and ticks on a background task
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel_token: CancellationToken,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick_delay = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                let event = tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = tick_delay => Some(Event::Tick),
                    Some(Ok(evt)) = crossterm_event => match evt {
                        // Windows reports releases too
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                        CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
                        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                        _ => None,
                    },
                };

                if let Some(event) = event {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            receiver,
            cancel_token,
        }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Stop the polling task
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }
}
