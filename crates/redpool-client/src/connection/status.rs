//! Connection lifecycle status.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Lifecycle stage reported by a connection handle.
///
/// Mirrors the status strings of the underlying client: a connection
/// starts `connecting`, becomes `ready`, and ends its life via `closing`
/// then `end`. `reconnecting` is an excursion from `ready` back toward
/// `connecting` taken by the client itself; shutdown only gates on
/// `ready` and `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Session establishment in progress.
    Connecting,
    /// Connected and able to serve commands.
    Ready,
    /// Connection lost; the client is re-establishing the session.
    Reconnecting,
    /// Graceful close requested, in-flight operations draining.
    Closing,
    /// Session terminated.
    End,
}

impl ConnectionStatus {
    /// Status name as reported by the underlying client.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Reconnecting => "reconnecting",
            Self::Closing => "closing",
            Self::End => "end",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lock-free cell holding the current status of a connection.
///
/// Readable from any task without blocking; writers are the connection's
/// own establishment and close paths.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

const CONNECTING: u8 = 0;
const READY: u8 = 1;
const RECONNECTING: u8 = 2;
const CLOSING: u8 = 3;
const END: u8 = 4;

impl StatusCell {
    /// Create a cell with the given initial status.
    pub fn new(status: ConnectionStatus) -> Self {
        Self(AtomicU8::new(encode(status)))
    }

    /// Read the current status.
    pub fn load(&self) -> ConnectionStatus {
        decode(self.0.load(Ordering::SeqCst))
    }

    /// Overwrite the current status.
    pub fn store(&self, status: ConnectionStatus) {
        self.0.store(encode(status), Ordering::SeqCst);
    }
}

fn encode(status: ConnectionStatus) -> u8 {
    match status {
        ConnectionStatus::Connecting => CONNECTING,
        ConnectionStatus::Ready => READY,
        ConnectionStatus::Reconnecting => RECONNECTING,
        ConnectionStatus::Closing => CLOSING,
        ConnectionStatus::End => END,
    }
}

fn decode(raw: u8) -> ConnectionStatus {
    match raw {
        CONNECTING => ConnectionStatus::Connecting,
        READY => ConnectionStatus::Ready,
        RECONNECTING => ConnectionStatus::Reconnecting,
        CLOSING => ConnectionStatus::Closing,
        _ => ConnectionStatus::End,
    }
}
