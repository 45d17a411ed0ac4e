use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::warn;

use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::handler::Handler;

const READ_CHUNK: usize = 4096;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    handler: Arc<Handler>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// What the read half produced.
pub enum Incoming {
    Request(Request),
    /// Bytes that can never become a request; answered with 400.
    Malformed(ParseError),
    /// Client closed the connection.
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, handler: Arc<Handler>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            handler,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Incoming::Request(req) => ConnectionState::Processing(req),
                        Incoming::Malformed(e) => {
                            warn!(error = ?e, "Rejecting malformed request");
                            let writer = ResponseWriter::new(&Response::bad_request());
                            ConnectionState::Writing(writer, false)
                        }
                        Incoming::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let (response, keep_alive) = Self::handle_request(&self.handler, req);
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    self.state = if *keep_alive {
                        ConnectionState::Reading
                    } else {
                        ConnectionState::Closed
                    };
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until a full request is buffered.
    pub async fn read_request(&mut self) -> anyhow::Result<Incoming> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Incoming::Request(request));
                }
                Err(ParseError::Incomplete) => {}
                Err(e) => return Ok(Incoming::Malformed(e)),
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                return Ok(Incoming::Closed);
            }
        }
    }

    fn handle_request(handler: &Handler, req: &Request) -> (Response, bool) {
        (handler.handle(req), req.keep_alive())
    }
}
