//! WebSocket listener: the transport boundary for subscribers.
//!
//! Each accepted connection is upgraded, attached to the hub, and served by
//! its own task that forwards serialized envelopes to the socket. Inbound
//! frames are drained; a close frame, a transport error, or a closed hub
//! channel detaches the subscriber without affecting others.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{PitwireError, Result};
use crate::hub::BroadcastHub;

/// Bind the listening endpoint.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| PitwireError::transport_error(format!("bind {addr}"), Box::new(e)))?;
    let bound = listener
        .local_addr()
        .map_err(|e| PitwireError::transport_error("local address", Box::new(e)))?;
    info!(addr = %bound, "WebSocket server listening");
    Ok(listener)
}

/// Accept subscriber connections until cancelled.
pub async fn run(listener: TcpListener, hub: Arc<BroadcastHub>, cancel: CancellationToken) {
    loop {
        let accepted = tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => accepted,
        };

        match accepted {
            Ok((stream, peer)) => {
                let hub = Arc::clone(&hub);
                tokio::spawn(async move {
                    serve_subscriber(stream, peer, hub).await;
                });
            }
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
            }
        }
    }
    info!("WebSocket server stopped");
}

async fn serve_subscriber(stream: TcpStream, peer: SocketAddr, hub: Arc<BroadcastHub>) {
    let ws = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            debug!(%peer, error = %e, "WebSocket handshake failed");
            return;
        }
    };

    let (id, mut rx) = hub.attach().await;
    info!(%peer, id, "Subscriber connected");

    let (mut sink, mut source) = ws.split();

    loop {
        tokio::select! {
            outbound = rx.recv() => match outbound {
                Some(text) => {
                    if let Err(e) = sink.send(Message::text(text)).await {
                        debug!(id, error = %e, "Send failed, dropping subscriber");
                        break;
                    }
                }
                // Hub closed the channel (shutdown)
                None => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            },
            inbound = source.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // inbound payloads are ignored
                Some(Err(e)) => {
                    debug!(id, error = %e, "Receive failed, dropping subscriber");
                    break;
                }
            },
        }
    }

    hub.detach(id).await;
    info!(%peer, id, "Subscriber disconnected");
}
