//! Periodic regeneration of the display code.
//!
//! The rotator owns a background task that mints a fresh `SessionCode`
//! every window and publishes it through a `watch` channel. Old codes are
//! not revoked; they simply go stale once their generation timestamp falls
//! outside the freshness window.

use chrono::Utc;
use db::session_code::SessionCode;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct CodeRotator {
    task: JoinHandle<()>,
    rx: watch::Receiver<SessionCode>,
}

impl CodeRotator {
    /// Starts the rotation task. The channel is seeded with a code for the
    /// current window, so subscribers never observe an empty state.
    pub fn spawn(window_millis: i64) -> Self {
        let initial = SessionCode::generate(Utc::now().timestamp_millis(), window_millis);
        let (tx, rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let period = Duration::from_millis(window_millis.max(1) as u64);
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately and would duplicate the seed.
            interval.tick().await;

            loop {
                interval.tick().await;
                let code = SessionCode::generate(Utc::now().timestamp_millis(), window_millis);
                if tx.send(code).is_err() {
                    // No subscribers left; stop rotating.
                    break;
                }
            }
        });

        Self { task, rx }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionCode> {
        self.rx.clone()
    }

    /// Cancels the periodic task. Stopping the display must not leak the
    /// timer.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CodeRotator {
    fn drop(&mut self) {
        self.task.abort();
    }
}
