//! Servers that misbehave at the socket level, which tiny_http cannot be
//! coaxed into doing.

use crate::pool::pool;
use std::{
    io::{Read, Write},
    net::{Shutdown, SocketAddr, TcpListener, TcpStream},
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

/// A server that answers every connection with a fixed sequence of bytes and
/// then hangs up.
#[derive(Clone)]
pub struct RawServer {
    addr: SocketAddr,
    connections: Arc<AtomicU32>,
}

impl RawServer {
    /// Start a server that writes `response` verbatim after reading the
    /// request head.
    pub fn new(response: impl Into<Vec<u8>>) -> Self {
        let response = response.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicU32::new(0));

        pool().execute({
            let connections = connections.clone();

            move || {
                for stream in listener.incoming() {
                    let stream = match stream {
                        Ok(stream) => stream,
                        Err(_) => break,
                    };

                    connections.fetch_add(1, Ordering::SeqCst);
                    respond(stream, &response);
                }
            }
        });

        Self { addr, connections }
    }

    /// Start a server that announces a body of `declared_len` bytes but only
    /// sends `body` before closing the connection.
    pub fn truncated(declared_len: usize, body: &str) -> Self {
        assert!(declared_len > body.len());

        Self::new(format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: {}\r\n\r\n{}",
            declared_len, body,
        ))
    }

    /// Get the HTTP URL of this server.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Get the number of connections accepted so far.
    pub fn connections(&self) -> u32 {
        self.connections.load(Ordering::SeqCst)
    }
}

fn respond(mut stream: TcpStream, response: &[u8]) {
    let mut head = Vec::new();
    let mut buf = [0; 1024];

    // Consume the request head so the client does not see a reset.
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(len) => head.extend_from_slice(&buf[..len]),
        }
    }

    stream.write_all(response).ok();
    stream.flush().ok();
    stream.shutdown(Shutdown::Both).ok();
}

/// Get a URL that nothing is listening on, so connecting to it is refused.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    drop(listener);

    format!("http://{}/", addr)
}
