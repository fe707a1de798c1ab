//! WebSocket connection and event loop.
//!
//! This module handles the WebSocket connection to the pixel controller,
//! including the one-shot handshake reply and close notification.
//!
//! # Event Loop
//!
//! The connection spawns a tokio task that handles:
//!
//! - Outgoing text commands, written in the order they were queued
//! - The first incoming text message (the handshake reply)
//! - Remote close, stream errors and end of stream
//! - The close handler callback

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, trace, warn};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// Client-side WebSocket stream.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Callback run once when the event loop ends.
///
/// Cleared with [`Connection::clear_close_handler`] to suppress it.
pub type CloseHandler = Box<dyn FnOnce() + Send>;

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Send one text message.
    Send(String),
    /// Close the connection after everything queued before it.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// WebSocket connection to a pixel controller.
///
/// The connection spawns an internal event loop task. Sends are queued on
/// an unbounded channel, so they never block and reach the controller in
/// call order.
///
/// # Thread Safety
///
/// `Connection` is `Send + Sync` and can be shared across tasks.
pub struct Connection {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    /// Receiver for the first inbound message, taken by `wait_reply`.
    reply_rx: Arc<Mutex<Option<oneshot::Receiver<String>>>>,
    /// Close handler (shared with event loop).
    close_handler: Arc<Mutex<Option<CloseHandler>>>,
}

impl Clone for Connection {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            reply_rx: Arc::clone(&self.reply_rx),
            close_handler: Arc::clone(&self.close_handler),
        }
    }
}

impl Connection {
    /// Opens a WebSocket connection to `url`.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if the upgrade does not finish within `connect_timeout`
    /// - [`Error::Connection`] if the controller is unreachable or refuses the upgrade
    pub async fn open(url: &Url, connect_timeout: Duration) -> Result<Self> {
        let (ws_stream, _response) = timeout(connect_timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| Error::connection_timeout(connect_timeout.as_millis() as u64))?
            .map_err(|e| Error::connection(format!("WebSocket handshake failed: {e}")))?;

        debug!(%url, "WebSocket connection opened");

        Ok(Self::new(ws_stream))
    }

    /// Creates a new connection from a WebSocket stream.
    ///
    /// Spawns the event loop task internally.
    pub(crate) fn new(ws_stream: WsStream) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = oneshot::channel();
        let close_handler: Arc<Mutex<Option<CloseHandler>>> = Arc::new(Mutex::new(None));

        tokio::spawn(Self::run_event_loop(
            ws_stream,
            command_rx,
            reply_tx,
            Arc::clone(&close_handler),
        ));

        Self {
            command_tx,
            reply_rx: Arc::new(Mutex::new(Some(reply_rx))),
            close_handler,
        }
    }

    /// Waits for the controller's first message.
    ///
    /// Can only be awaited once per connection.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if nothing arrives within `reply_timeout`
    /// - [`Error::ConnectionClosed`] if the connection closes first
    /// - [`Error::Protocol`] if the reply was already consumed
    pub async fn wait_reply(&self, reply_timeout: Duration) -> Result<String> {
        let rx = self
            .reply_rx
            .lock()
            .take()
            .ok_or_else(|| Error::protocol("Handshake reply already consumed"))?;

        timeout(reply_timeout, rx)
            .await
            .map_err(|_| Error::connection_timeout(reply_timeout.as_millis() as u64))?
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Sets the close handler.
    ///
    /// Runs once when the event loop ends, unless cleared first.
    pub fn set_close_handler(&self, handler: CloseHandler) {
        let mut guard = self.close_handler.lock();
        *guard = Some(handler);
    }

    /// Clears the close handler.
    pub fn clear_close_handler(&self) {
        let mut guard = self.close_handler.lock();
        *guard = None;
    }

    /// Queues one text message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the event loop has ended.
    pub fn send_text(&self, text: impl Into<String>) -> Result<()> {
        self.command_tx
            .send(ConnectionCommand::Send(text.into()))
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Returns `true` once the event loop has ended.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    /// Closes the connection after all previously queued messages.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Event loop that handles WebSocket I/O.
    async fn run_event_loop(
        ws_stream: WsStream,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        reply_tx: oneshot::Sender<String>,
        close_handler: Arc<Mutex<Option<CloseHandler>>>,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();
        let mut reply_tx = Some(reply_tx);

        loop {
            tokio::select! {
                // Incoming messages from controller
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            Self::handle_incoming_text(text.as_str(), &mut reply_tx);
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Commands from the session
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Send(text)) => {
                            trace!(command = %text, "Sending");
                            if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                                warn!(error = %e, "Failed to send command");
                                break;
                            }
                        }

                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }

        command_rx.close();

        let handler = close_handler.lock().take();
        if let Some(handler) = handler {
            handler();
        }

        debug!("Event loop terminated");
    }

    /// Routes an incoming text message.
    ///
    /// Only the first message means anything; later ones are dropped.
    fn handle_incoming_text(text: &str, reply_tx: &mut Option<oneshot::Sender<String>>) {
        match reply_tx.take() {
            Some(tx) => {
                if tx.send(text.to_owned()).is_err() {
                    debug!("Handshake reply arrived with nobody waiting");
                }
            }
            None => trace!(text = %text, "Ignoring unsolicited message"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
