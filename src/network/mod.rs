use std::{
    io,
    net::{SocketAddr, TcpListener as StdTcpListener, ToSocketAddrs},
};
use thiserror::Error;
use tokio::net::TcpListener as TokioTcpListener;

/// Pending connections queued by the kernel before `accept`.
const LISTEN_BACKLOG: i32 = 1024;

/// Defines all possible errors for listener construction.
#[derive(Error, Debug)]
pub enum SocketError {
    #[error("Failed to resolve listen address '{address}'")]
    Resolve {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Listen address '{0}' did not resolve to any socket address")]
    NoAddress(String),

    #[error("Failed to create a new socket")]
    CreateSocket(#[source] io::Error),

    #[error("Failed to set SO_REUSEADDR on socket")]
    SetReuseAddress(#[source] io::Error),

    #[error("Failed to bind socket to {address}")]
    BindSocket {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to listen on socket")]
    Listen(#[source] io::Error),

    #[error("Failed to set socket to non-blocking mode")]
    SetNonBlocking(#[source] io::Error),

    #[error("Failed to convert socket to TokioTcpListener")]
    ConvertToTokio(#[source] io::Error),
}

/// Resolves a listen address to the socket address to bind.
///
/// A bare `:PORT` listens on every IPv4 interface. Host names are resolved
/// and the first result is used.
pub fn resolve_listen_address(address: &str) -> Result<SocketAddr, SocketError> {
    let candidate = if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    };

    candidate
        .to_socket_addrs()
        .map_err(|source| SocketError::Resolve {
            address: address.to_string(),
            source,
        })?
        .next()
        .ok_or_else(|| SocketError::NoAddress(address.to_string()))
}

/// Creates a new `tokio::net::TcpListener` bound to `address`.
///
/// The socket is built with `socket2` so `SO_REUSEADDR` is in place before
/// binding, which lets the exporter restart while old connections linger in
/// `TIME_WAIT`.
pub fn new_tokio_listener(address: &str) -> Result<TokioTcpListener, SocketError> {
    use socket2::{Domain, Protocol, Socket, Type};

    let addr = resolve_listen_address(address)?;

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
        .map_err(SocketError::CreateSocket)?;

    socket
        .set_reuse_address(true)
        .map_err(SocketError::SetReuseAddress)?;

    socket
        .bind(&addr.into())
        .map_err(|source| SocketError::BindSocket {
            address: addr,
            source,
        })?;

    socket.listen(LISTEN_BACKLOG).map_err(SocketError::Listen)?;

    // Convert to a standard listener, then into a Tokio listener.
    let std_listener: StdTcpListener = socket.into();
    std_listener
        .set_nonblocking(true)
        .map_err(SocketError::SetNonBlocking)?;
    TokioTcpListener::from_std(std_listener).map_err(SocketError::ConvertToTokio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_port_only_listens_on_all_interfaces() {
        let addr = resolve_listen_address(":9967").unwrap();
        assert_eq!(addr.ip(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(addr.port(), 9967);
    }

    #[test]
    fn test_explicit_address() {
        let addr = resolve_listen_address("127.0.0.1:8080").unwrap();
        assert_eq!(addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_missing_port_is_rejected() {
        let err = resolve_listen_address("127.0.0.1").unwrap_err();
        assert!(matches!(err, SocketError::Resolve { .. }));
    }

    #[tokio::test]
    async fn test_listener_binds_ephemeral_port() {
        let listener = new_tokio_listener("127.0.0.1:0").unwrap();
        let local = listener.local_addr().unwrap();

        assert!(local.ip().is_loopback());
        assert_ne!(local.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let first = new_tokio_listener("127.0.0.1:0").unwrap();
        let taken = first.local_addr().unwrap().to_string();

        let err = new_tokio_listener(&taken).unwrap_err();
        assert!(matches!(err, SocketError::BindSocket { .. }));
    }
}
