//! Listening socket and connection tracking with admission control.
//!
//! The device accepts TCP connections from anyone while unpaired; once a
//! pairing record names a controller address, only that exact peer address
//! is admitted. Rejected sockets are closed on the spot — a rejected peer
//! must never cost a file descriptor.

use std::io::{self, Write as _};
use std::net::{SocketAddr, TcpListener, TcpStream};

use async_io_mini::Async;
use log::{info, warn};

/// Greeting sent to every admitted peer.
pub const GREETING: &[u8] = b"connected\n";

/// One admitted peer: address plus a non-blocking duplex stream.
pub struct Connection {
    pub peer: SocketAddr,
    pub stream: Async<TcpStream>,
}

/// Owns the listening socket and the set of live connections.
pub struct ConnectionManager {
    listener: Async<TcpListener>,
    conns: Vec<Connection>,
}

impl ConnectionManager {
    /// Bind the listening socket (non-blocking, reactor-registered).
    pub fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener: Async::new(listener)?,
            conns: Vec::new(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.get_ref().local_addr()
    }

    /// The listening socket, for readiness waits.
    pub fn listener(&self) -> &Async<TcpListener> {
        &self.listener
    }

    /// Live connections, for readiness waits.
    pub fn connections(&self) -> &[Connection] {
        &self.conns
    }

    /// Look up a live connection by peer address.
    pub fn get(&self, peer: SocketAddr) -> Option<&Connection> {
        self.conns.iter().find(|c| c.peer == peer)
    }

    /// Accept one pending connection, applying admission control.
    ///
    /// `paired == None` admits any peer; otherwise only the peer whose IP
    /// equals the paired address. Admitted peers get the `"connected\n"`
    /// greeting and join the tracked set. Rejected sockets are dropped
    /// (closed) immediately.
    pub fn accept_if_admissible(&mut self, paired: Option<&str>) -> Option<SocketAddr> {
        let (stream, peer) = match self.listener.get_ref().accept() {
            Ok(accepted) => accepted,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return None,
            Err(e) => {
                warn!("accept failed: {}", e);
                return None;
            }
        };

        let admissible = paired.is_none_or(|p| peer.ip().to_string() == p);
        if !admissible {
            info!("rejected connection from {} (paired elsewhere)", peer);
            drop(stream); // close now — never leak the handle
            return None;
        }

        let stream = match Async::new(stream) {
            Ok(s) => s,
            Err(e) => {
                warn!("could not register {} with the reactor: {}", peer, e);
                return None;
            }
        };
        let mut writer: &TcpStream = stream.get_ref();
        if let Err(e) = writer.write_all(GREETING) {
            warn!("greeting to {} failed: {}", peer, e);
            return None;
        }

        info!("client {} connected", peer);
        self.conns.push(Connection { peer, stream });
        Some(peer)
    }

    /// Evict a connection; dropping the stream closes the socket.
    /// Idempotent — evicting an already-gone peer is a no-op.
    pub fn evict(&mut self, peer: SocketAddr) {
        self.conns.retain(|c| c.peer != peer);
    }
}
