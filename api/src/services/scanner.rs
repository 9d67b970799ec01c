//! Capability boundary for whatever produces decoded code strings.
//!
//! The originating system fed the matcher from a simulated camera trigger.
//! Anything that can yield decoded strings — a real QR decoder, a manual
//! entry form, a test fixture — implements `CodeSource`; the matcher and
//! the scan pipeline never know the difference.

use tokio::sync::mpsc;

/// A lazy, cancellable sequence of decoded code strings. Returning `None`
/// ends the sequence (decoder shut down, channel closed).
pub trait CodeSource: Send {
    fn next_code(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// `CodeSource` backed by an mpsc channel. The sender side lives wherever
/// decoding happens; dropping it cancels the sequence.
pub struct ChannelCodeSource {
    rx: mpsc::Receiver<String>,
}

impl ChannelCodeSource {
    pub fn channel(buffer: usize) -> (mpsc::Sender<String>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx })
    }
}

impl CodeSource for ChannelCodeSource {
    async fn next_code(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}
