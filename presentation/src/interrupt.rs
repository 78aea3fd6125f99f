//! Ctrl-C handling while a turn runs.
//!
//! Outside a turn the line editor sees Ctrl-C as a key press and the REPL asks
//! for exit confirmation instead.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Cancels one turn's token on the first Ctrl-C.
///
/// The listener lives as long as the guard; dropping it deregisters the
/// listener on every exit path.
#[must_use = "the listener is removed when the guard is dropped"]
pub struct TurnInterrupt {
    listener: JoinHandle<()>,
}

impl TurnInterrupt {
    pub fn arm(token: CancellationToken) -> Self {
        Self::arm_on(token, tokio::signal::ctrl_c())
    }

    /// Cancel `token` when `signal` resolves successfully.
    pub fn arm_on<F>(token: CancellationToken, signal: F) -> Self
    where
        F: Future<Output = std::io::Result<()>> + Send + 'static,
    {
        let listener = tokio::spawn(async move {
            match signal.await {
                Ok(()) => {
                    debug!("Interrupt received, canceling turn");
                    token.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        });
        Self { listener }
    }
}

impl Drop for TurnInterrupt {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn signal(rx: oneshot::Receiver<()>) -> impl Future<Output = std::io::Result<()>> {
        async move {
            rx.await
                .map_err(|_| std::io::Error::other("sender dropped"))
        }
    }

    #[tokio::test]
    async fn test_signal_cancels_token() {
        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let _guard = TurnInterrupt::arm_on(token.clone(), signal(rx));

        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token was not canceled");
    }

    #[tokio::test]
    async fn test_drop_deregisters_listener() {
        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let guard = TurnInterrupt::arm_on(token.clone(), signal(rx));
        drop(guard);
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The aborted listener has dropped its receiver.
        assert!(tx.send(()).is_err());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_signal_error_leaves_token_alone() {
        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel::<()>();
        let _guard = TurnInterrupt::arm_on(token.clone(), signal(rx));
        drop(tx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!token.is_cancelled());
    }
}
