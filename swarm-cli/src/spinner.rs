//! Terminal spinner
//!
//! A ticker task that redraws `message` with a rotating glyph until stopped.

use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TICK: Duration = Duration::from_millis(120);

pub struct Spinner {
    cancel: CancellationToken,
    handle: JoinHandle<usize>,
}

impl Spinner {
    /// Starts drawing on stdout
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut out = std::io::stdout();
            let mut ticks = 0;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let _ = write!(out, "\r{} {}", message, frame(ticks));
                        let _ = out.flush();
                        ticks += 1;
                    }
                }
            }

            // Blank the line so following output starts clean
            let _ = write!(out, "\r{}\r", " ".repeat(message.chars().count() + 2));
            let _ = out.flush();
            ticks
        });

        Self { cancel, handle }
    }

    /// Stops the ticker and waits until the line is cleared.
    /// Returns the number of frames drawn.
    pub async fn stop(self) -> usize {
        self.cancel.cancel();
        self.handle.await.unwrap_or(0)
    }
}

fn frame(tick: usize) -> char {
    FRAMES[tick % FRAMES.len()]
}
