//! Listener for the server's mutation event channel.
//!
//! The backend pushes a small JSON message on its WebSocket endpoint
//! whenever an item, location or label changes, and UI stores use those
//! to invalidate caches. The listener keeps one connection alive,
//! reconnecting with jittered exponential backoff, and fans messages out
//! through a broadcast channel.

mod backoff;

use std::time::Duration;

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::{
	net::TcpStream,
	sync::{broadcast, watch},
};
use tokio_tungstenite::{
	tungstenite::{client::IntoClientRequest, http::HeaderValue, Message},
	MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, warn};

pub use backoff::Backoff;

/// Route the event socket is mounted under.
pub const EVENTS_PATH: &str = "/api/v1/ws/events";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerEvent {
	#[serde(rename = "location.mutation")]
	LocationMutation,
	#[serde(rename = "item.mutation")]
	ItemMutation,
	#[serde(rename = "label.mutation")]
	LabelMutation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMessage {
	pub event: ServerEvent,
}

#[derive(thiserror::Error, Debug)]
pub enum EventsError {
	#[error("websocket failure: {0}")]
	WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
	#[error("token is not a valid header value")]
	InvalidToken,
}

/// Connection tuning for [`EventsClient`].
#[derive(Debug, Clone)]
pub struct EventsOptions {
	/// Sent verbatim as the `Authorization` header when present.
	pub token: Option<String>,
	pub backoff_base: Duration,
	pub backoff_cap: Duration,
}

impl Default for EventsOptions {
	fn default() -> Self {
		Self {
			token: None,
			backoff_base: Duration::from_secs(1),
			backoff_cap: Duration::from_secs(60),
		}
	}
}

/// Derives the event socket URL from an HTTP base URL.
pub fn events_url(base_url: &str) -> String {
	let base = base_url.trim_end_matches('/');
	let ws_base = if let Some(rest) = base.strip_prefix("https://") {
		format!("wss://{rest}")
	} else if let Some(rest) = base.strip_prefix("http://") {
		format!("ws://{rest}")
	} else {
		base.to_string()
	};

	format!("{ws_base}{EVENTS_PATH}")
}

/// Handle over the background listener. Dropping it stops the listener.
pub struct EventsClient {
	events_tx: broadcast::Sender<EventMessage>,
	shutdown_tx: watch::Sender<bool>,
}

impl EventsClient {
	/// Spawns the listener against `url`. Must be called from within a
	/// tokio runtime.
	pub fn connect(url: impl Into<String>, options: EventsOptions) -> Self {
		let (events_tx, _) = broadcast::channel(64);
		let (shutdown_tx, shutdown_rx) = watch::channel(false);

		tokio::spawn(run(url.into(), options, events_tx.clone(), shutdown_rx));

		Self {
			events_tx,
			shutdown_tx,
		}
	}

	/// A fresh receiver over every event observed from now on. Slow
	/// receivers that fall behind the channel capacity see a lag error,
	/// not a stall of the listener.
	pub fn subscribe(&self) -> broadcast::Receiver<EventMessage> {
		self.events_tx.subscribe()
	}

	pub fn shutdown(&self) {
		let _ = self.shutdown_tx.send(true);
	}
}

impl Drop for EventsClient {
	fn drop(&mut self) {
		let _ = self.shutdown_tx.send(true);
	}
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(url: &str, token: Option<&str>) -> Result<WsStream, EventsError> {
	let mut request = url.into_client_request()?;

	if let Some(token) = token {
		let value = HeaderValue::from_str(token).map_err(|_| EventsError::InvalidToken)?;
		request.headers_mut().insert("Authorization", value);
	}

	let (stream, _) = tokio_tungstenite::connect_async(request).await?;
	Ok(stream)
}

async fn run(
	url: String,
	options: EventsOptions,
	events_tx: broadcast::Sender<EventMessage>,
	mut shutdown_rx: watch::Receiver<bool>,
) {
	let mut backoff = Backoff::new(options.backoff_base, options.backoff_cap);

	loop {
		if *shutdown_rx.borrow() {
			return;
		}

		match connect(&url, options.token.as_deref()).await {
			Ok(mut stream) => {
				debug!(url = %url, "event channel connected");
				backoff.reset();

				loop {
					tokio::select! {
						changed = shutdown_rx.changed() => {
							if changed.is_err() || *shutdown_rx.borrow() {
								return;
							}
						}
						message = stream.next() => match message {
							Some(Ok(Message::Text(raw))) => match serde_json::from_str::<EventMessage>(&raw) {
								Ok(event) => {
									let _ = events_tx.send(event);
								}
								Err(e) => warn!(error = %e, "undecodable event message"),
							},
							Some(Ok(Message::Close(_))) | None => {
								debug!(url = %url, "event channel closed");
								break;
							}
							Some(Ok(_)) => {}
							Some(Err(e)) => {
								warn!(error = %e, "event channel failed");
								break;
							}
						}
					}
				}
			}
			Err(e) => warn!(url = %url, error = %e, "event channel connect failed"),
		}

		let delay = backoff.next_delay();
		debug!(delay_ms = delay.as_millis() as u64, "event channel reconnecting");

		tokio::select! {
			changed = shutdown_rx.changed() => {
				if changed.is_err() || *shutdown_rx.borrow() {
					return;
				}
			}
			() = tokio::time::sleep(delay) => {}
		}
	}
}
