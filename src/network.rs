use std::{
    io,
    net::{SocketAddr, SocketAddrV4, ToSocketAddrs, UdpSocket},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    constants::TARGET_PORT,
    frame::{self, Extent},
    pad_state::DeviceState,
};

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to bind UDP socket: {0}")]
    Bind(#[source] io::Error),
    #[error("could not resolve '{host}': {source}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' has no IPv4 address")]
    NoIpv4(String),
}

/// Resolve `host` to the console's input-redirection endpoint.
pub fn resolve_peer(host: &str) -> Result<SocketAddrV4, NetworkError> {
    let addrs = (host, TARGET_PORT)
        .to_socket_addrs()
        .map_err(|source| NetworkError::Lookup {
            host: host.to_string(),
            source,
        })?;
    addrs
        .filter_map(|a| match a {
            SocketAddr::V4(v4) => Some(v4),
            SocketAddr::V6(_) => None,
        })
        .last()
        .ok_or_else(|| NetworkError::NoIpv4(host.to_string()))
}

/// Fire-and-forget UDP sender. Without a resolved peer nothing is encoded or sent.
pub struct Sender {
    sock: UdpSocket,
    peer: Option<SocketAddrV4>,
}

impl Sender {
    pub fn new(target: Option<&str>) -> Result<Self, NetworkError> {
        let sock = UdpSocket::bind("0.0.0.0:0").map_err(NetworkError::Bind)?;
        sock.set_nonblocking(true).map_err(NetworkError::Bind)?;
        let mut sender = Self { sock, peer: None };
        if let Some(host) = target {
            sender.set_target(host);
        }
        Ok(sender)
    }

    /// Resolve a new peer. On failure networking stays disabled until the next call.
    pub fn set_target(&mut self, host: &str) {
        match resolve_peer(host) {
            Ok(addr) => {
                info!("Sending input to {}", addr);
                self.peer = Some(addr);
            }
            Err(e) => {
                warn!("{}; frames will not be sent", e);
                self.peer = None;
            }
        }
    }

    pub fn set_peer(&mut self, peer: Option<SocketAddrV4>) {
        self.peer = peer;
    }

    pub fn peer(&self) -> Option<SocketAddrV4> {
        self.peer
    }

    /// Encode and send one frame. Send errors are logged and dropped.
    pub fn send_state(&self, st: &DeviceState, window: Extent) {
        let Some(peer) = self.peer else {
            return;
        };
        let payload = frame::encode(st, window);
        debug!("Sending frame {:02X?}", payload);
        if let Err(e) = self.sock.send_to(&payload, peer) {
            warn!("Failed to send UDP packet to {}: {}", peer, e);
        }
    }
}
