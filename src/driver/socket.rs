use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::engine::{EstimateBundle, Estimator};
use crate::error::EstimateError;
use crate::logging::{LogLevel, Logger, SOCKET_TARGET, json_kv, json_str};

pub type DriverResult<T> = std::result::Result<T, SocketDriverError>;

#[derive(Debug, Error)]
pub enum SocketDriverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One response line.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Frame {
    Estimate { ok: bool, estimate: Box<EstimateBundle> },
    Failure { ok: bool, error: FrameError },
}

#[derive(Debug, Serialize)]
pub struct FrameError {
    /// Offending input field, when the request itself was invalid.
    pub field: Option<&'static str>,
    pub message: String,
}

impl Frame {
    fn estimate(bundle: EstimateBundle) -> Self {
        Frame::Estimate {
            ok: true,
            estimate: Box::new(bundle),
        }
    }

    fn failure(field: Option<&'static str>, message: impl Into<String>) -> Self {
        Frame::Failure {
            ok: false,
            error: FrameError {
                field,
                message: message.into(),
            },
        }
    }
}

/// JSON-lines TCP boundary in front of an [`Estimator`].
///
/// Each request line is `{"area":..,"floors":..,"wage":..,"cost":..}` and is
/// answered by exactly one frame. Connections are served one at a time.
pub struct SocketDriver {
    listener: TcpListener,
    estimator: Estimator,
    logger: Option<Logger>,
}

impl SocketDriver {
    pub fn bind<A>(addr: A, estimator: Estimator) -> DriverResult<Self>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            estimator,
            logger: None,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn local_addr(&self) -> DriverResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve connections forever. A failing connection is logged and
    /// dropped; the listener keeps accepting.
    pub fn run(self) -> DriverResult<()> {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    self.log(
                        LogLevel::Warn,
                        "accept_failed",
                        [json_str("error", err.to_string())],
                    );
                    continue;
                }
            };
            if let Err(err) = self.serve(stream) {
                self.log(
                    LogLevel::Warn,
                    "connection_failed",
                    [json_str("error", err.to_string())],
                );
            }
        }
        Ok(())
    }

    /// Serve a single connection and return once the peer hangs up.
    pub fn run_once(&self) -> DriverResult<()> {
        let (stream, _) = self.listener.accept()?;
        self.serve(stream)
    }

    fn serve(&self, stream: TcpStream) -> DriverResult<()> {
        stream.set_nodelay(true).ok();
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default();
        self.log(LogLevel::Info, "connection_opened", [json_str("peer", peer.clone())]);

        let mut inbound = BufReader::new(stream.try_clone()?);
        let mut writer = stream;
        let mut served = 0u64;
        let mut raw = Vec::new();
        loop {
            raw.clear();
            if inbound.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let encoded = match std::str::from_utf8(&raw) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line)?,
                Err(err) => {
                    self.log(
                        LogLevel::Warn,
                        "request_malformed",
                        [json_str("error", err.to_string())],
                    );
                    serde_json::to_string(&Frame::failure(
                        None,
                        format!("malformed request: {err}"),
                    ))?
                }
            };
            writer.write_all(encoded.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            served += 1;
        }

        self.log(
            LogLevel::Info,
            "connection_closed",
            [json_str("peer", peer), json_kv("requests", served)],
        );
        self.estimator.emit_metrics();
        Ok(())
    }

    /// Answer one request line with one encoded frame.
    pub fn handle_line(&self, line: &str) -> DriverResult<String> {
        let frame = match serde_json::from_str::<Value>(line) {
            Ok(payload) => match self.estimator.estimate_json(&payload) {
                Ok(bundle) => Frame::estimate(bundle),
                Err(err) => failure_frame(&err),
            },
            Err(err) => {
                self.log(
                    LogLevel::Warn,
                    "request_malformed",
                    [json_str("error", err.to_string())],
                );
                Frame::failure(None, format!("malformed request: {err}"))
            }
        };
        Ok(serde_json::to_string(&frame)?)
    }

    fn log<const N: usize>(&self, level: LogLevel, message: &str, fields: [(String, Value); N]) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_with_fields(level, SOCKET_TARGET, message, fields);
        }
    }
}

fn failure_frame(err: &EstimateError) -> Frame {
    match err {
        EstimateError::InvalidInput(invalid) => {
            Frame::failure(Some(invalid.field.as_str()), invalid.reason.clone())
        }
        other => Frame::failure(None, other.to_string()),
    }
}
