//! HTTP presentation adapter.
//!
//! A blocking `std::net::TcpListener` server: one thread per connection,
//! one request per connection (`Connection: close`).  Every request goes
//! through [`routes::handle`], which only calls into the
//! [`PinController`]; this module owns sockets and framing, nothing else.
//!
//! ## Connection model
//!
//! 1. [`HttpServer::bind`] binds the listener (port `0` picks a free port;
//!    use [`HttpServer::local_addr`] to discover it).
//! 2. [`HttpServer::serve`] accepts forever, spawning a short-lived thread
//!    per client.
//! 3. Each connection reads one request head, writes one JSON response,
//!    and closes.  Malformed input is answered with `4xx`, never a panic.
//!
//! At most [`MAX_CONNECTIONS`] connections are served at once.  Past that
//! the accept loop answers `503` itself and closes, so a stuck GPIO bus
//! (every request queued on the controller lock) cannot pile up threads.

pub mod request;
pub mod routes;

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use log::{debug, info, warn};

use crate::app::ports::{EventSink, GpioPort};
use crate::app::service::PinController;

use request::{MAX_REQUEST_BYTES, RequestError, read_request};
use routes::{Response, reason};

/// How long a client gets to send its request head.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on connections being served concurrently.
pub const MAX_CONNECTIONS: usize = 16;

/// Counts in-flight connections against a fixed cap.
#[derive(Debug, Clone)]
struct ConnectionSlots {
    active: Arc<AtomicUsize>,
    max: usize,
}

/// Held for the life of one connection; frees its slot on drop.
struct Slot(Arc<AtomicUsize>);

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ConnectionSlots {
    fn new(max: usize) -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            max,
        }
    }

    fn try_acquire(&self) -> Option<Slot> {
        self.active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.max).then_some(n + 1)
            })
            .ok()
            .map(|_| Slot(Arc::clone(&self.active)))
    }
}

/// Single-listener HTTP server.
pub struct HttpServer {
    listener: TcpListener,
    slots: ConnectionSlots,
}

impl HttpServer {
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        info!("HTTP: listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            slots: ConnectionSlots::new(MAX_CONNECTIONS),
        })
    }

    /// Override [`MAX_CONNECTIONS`].
    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.slots = ConnectionSlots::new(max);
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the listener fails.
    pub fn serve<G, S>(self, controller: Arc<PinController<G, S>>) -> io::Result<()>
    where
        G: GpioPort + Send + 'static,
        S: EventSink + Send + 'static,
    {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    warn!("HTTP: accept error: {}", e);
                    continue;
                }
            };
            let Some(slot) = self.slots.try_acquire() else {
                warn!("HTTP: {} connections in flight, refusing", self.slots.max);
                if let Err(e) = refuse(stream) {
                    debug!("HTTP: refusal not delivered: {}", e);
                }
                continue;
            };
            let controller = Arc::clone(&controller);
            let spawned = std::thread::Builder::new()
                .name("http-conn".into())
                .spawn(move || {
                    let _slot = slot;
                    if let Err(e) = handle_connection(&controller, stream) {
                        debug!("HTTP: connection error: {}", e);
                    }
                });
            if let Err(e) = spawned {
                warn!("HTTP: failed to spawn connection thread: {}", e);
            }
        }
        Ok(())
    }
}

/// Serve exactly one request on `stream`.
pub fn handle_connection<G: GpioPort, S: EventSink>(
    controller: &PinController<G, S>,
    mut stream: TcpStream,
) -> io::Result<()> {
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let peer = stream.peer_addr().ok();

    let response = match read_request(&mut stream) {
        Ok(request) => {
            debug!("HTTP: {:?} {} {}", peer, request.method, request.path);
            routes::handle(controller, &request)
        }
        Err(RequestError::Incomplete) => return Ok(()),
        Err(e @ RequestError::TooLarge) => Response::error(413, e.to_string()),
        Err(e @ RequestError::Malformed(_)) => Response::error(400, e.to_string()),
    };

    write_response(&mut stream, &response)
}

/// How long a refused client gets to finish sending before we close.
const REFUSE_LINGER: Duration = Duration::from_millis(100);

/// Answer `503` on the accept thread.
///
/// Whatever the client already sent is drained briefly so the close is a
/// FIN rather than a reset that could swallow the response.
fn refuse(mut stream: TcpStream) -> io::Result<()> {
    stream.set_write_timeout(Some(READ_TIMEOUT))?;
    write_response(&mut stream, &Response::error(503, "server busy"))?;
    stream.shutdown(Shutdown::Write)?;
    stream.set_read_timeout(Some(REFUSE_LINGER))?;
    let _ = io::copy(&mut (&stream).take(MAX_REQUEST_BYTES as u64), &mut io::sink());
    Ok(())
}

/// Serialise `response` as an HTTP/1.1 message with a JSON body.
pub fn write_response(writer: &mut impl Write, response: &Response) -> io::Result<()> {
    let body = serde_json::to_vec(&response.body).map_err(io::Error::other)?;
    write!(
        writer,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        body.len()
    )?;
    writer.write_all(&body)?;
    writer.flush()
}
