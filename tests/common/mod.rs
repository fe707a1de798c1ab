//! Mock pixel controller for integration tests.
//!
//! Accepts any number of WebSocket connections, answers `init` with a
//! scripted reply and records everything it sees.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Notify, mpsc};
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

// ============================================================================
// Constants
// ============================================================================

/// Upper bound for any single wait in a test.
pub const WAIT: Duration = Duration::from_secs(5);

// ============================================================================
// Seen
// ============================================================================

/// Something the controller observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    /// A client completed the WebSocket upgrade.
    Opened,
    /// A text frame.
    Text(String),
    /// A close frame from the client.
    Closed,
    /// The stream ended without a close frame.
    Dropped,
    /// The controller hung up on the client.
    HungUp,
}

// ============================================================================
// MockController
// ============================================================================

/// A scripted controller listening on a random local port.
pub struct MockController {
    addr: SocketAddr,
    seen: mpsc::UnboundedReceiver<Seen>,
    hang_up: Arc<Notify>,
}

impl MockController {
    /// Starts a controller that answers `init` with `pixel_count`.
    pub async fn with_pixels(pixel_count: u32) -> Self {
        Self::spawn(Some(pixel_count.to_string())).await
    }

    /// Starts a controller that answers `init` with `reply` verbatim.
    pub async fn replying(reply: &str) -> Self {
        Self::spawn(Some(reply.to_owned())).await
    }

    /// Starts a controller that never answers.
    pub async fn silent() -> Self {
        Self::spawn(None).await
    }

    async fn spawn(reply: Option<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (seen_tx, seen) = mpsc::unbounded_channel();
        let hang_up = Arc::new(Notify::new());

        let notify = Arc::clone(&hang_up);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(
                    stream,
                    reply.clone(),
                    seen_tx.clone(),
                    Arc::clone(&notify),
                ));
            }
        });

        Self {
            addr,
            seen,
            hang_up,
        }
    }

    /// Host the controller listens on.
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Port the controller listens on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Closes the current client connection from the controller side.
    pub fn hang_up(&self) {
        self.hang_up.notify_one();
    }

    /// Returns the next observation, panicking after [`WAIT`].
    pub async fn next(&mut self) -> Seen {
        timeout(WAIT, self.seen.recv())
            .await
            .expect("controller observation timed out")
            .expect("controller stopped")
    }

    /// Asserts the next observation is the text frame `expected`.
    pub async fn expect_text(&mut self, expected: &str) {
        assert_eq!(self.next().await, Seen::Text(expected.to_owned()));
    }

    /// Skips the upgrade and `init` of a fresh connection.
    pub async fn expect_handshake(&mut self) {
        assert_eq!(self.next().await, Seen::Opened);
        self.expect_text("init").await;
    }
}

/// Serves one client connection.
async fn serve(
    stream: TcpStream,
    reply: Option<String>,
    seen: mpsc::UnboundedSender<Seen>,
    hang_up: Arc<Notify>,
) {
    let Ok(mut ws) = accept_async(stream).await else {
        return;
    };
    let _ = seen.send(Seen::Opened);

    loop {
        tokio::select! {
            message = ws.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let text = text.as_str().to_owned();
                    if text == "init"
                        && let Some(reply) = &reply
                    {
                        let _ = ws.send(Message::Text(reply.clone().into())).await;
                    }
                    let _ = seen.send(Seen::Text(text));
                }
                Some(Ok(Message::Close(_))) => {
                    let _ = seen.send(Seen::Closed);
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(_)) | None => {
                    let _ = seen.send(Seen::Dropped);
                    break;
                }
            },

            () = hang_up.notified() => {
                let _ = ws.close(None).await;
                let _ = seen.send(Seen::HungUp);
                break;
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Polls `condition` until it holds, panicking after [`WAIT`].
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    timeout(WAIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
