//! Cancellation token for the poll loop.
//!
//! The token is a `crossbeam_channel` receiver whose only sender is held by the
//! trigger. Nothing is ever sent: cancelling drops the sender, which
//! disconnects the channel for good, so every later check observes it.
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};

/// Fires the shutdown. Usually moved into the Ctrl+C handler.
pub struct ShutdownTrigger {
    tx: Option<Sender<()>>,
}

/// Observed by the poll loop at each iteration boundary.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: Receiver<()>,
}

/// Create a connected trigger/token pair.
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownToken) {
    let (tx, rx) = bounded(0);
    (ShutdownTrigger { tx: Some(tx) }, ShutdownToken { rx })
}

impl ShutdownTrigger {
    /// Cancel every token of this pair. Idempotent.
    pub fn cancel(&mut self) {
        self.tx.take();
    }
}

impl ShutdownToken {
    /// `true` once the trigger has fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleep for up to `timeout`, waking early on cancellation.
    ///
    /// Returns `true` when cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        matches!(
            self.rx.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn fresh_token_is_live() {
        let (_trigger, token) = shutdown_channel();
        assert!(!token.is_cancelled());
        assert!(!token.wait(Duration::from_millis(10)));
    }

    #[test]
    fn cancel_is_sticky() {
        let (mut trigger, token) = shutdown_channel();
        trigger.cancel();
        trigger.cancel();
        assert!(token.is_cancelled());
        assert!(token.is_cancelled());
        assert!(token.clone().wait(Duration::from_secs(5)));
    }

    #[test]
    fn wait_wakes_on_cancel() {
        let (mut trigger, token) = shutdown_channel();
        let started = Instant::now();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            trigger.cancel();
        });
        assert!(token.wait(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(30));
        handle.join().unwrap();
    }
}
