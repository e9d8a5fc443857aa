mod errors;
mod mode;


use log::{debug, info, warn};

use crate::logging;
use crate::options::{OptionError, SessionOptions};
use crate::transport::{
    ConnectionId, EngineTuning, Interrupt, SessionParameters, StreamId, Transport, WaitOutcome,
};
use crate::uri;

pub use self::errors::SessionError;
pub use self::mode::DeliveryMode;

/// The requested I/O direction of a session
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// The session plays an existing publication
    Read,

    /// The session publishes a new stream
    Write,
}

/// A live RTMFP session over a transport engine.
///
/// The `RtmfpSession` encapsulates the blocking open sequence (engine tuning,
/// callback installation, URI resolution, connect, connected-event wait and
/// delivery mode start) and afterwards exposes blocking reads and writes over
/// the single stream the chosen mode produced.
///
/// A session owns its engine connection exclusively and is meant to be used
/// from the thread that opened it; the adapter itself holds no locks and no
/// internal threads. All long waits poll the caller's [`Interrupt`] so a user
/// abort unblocks them promptly.
pub struct RtmfpSession<T: Transport> {
    transport: T,
    connection: ConnectionId,
    stream: StreamId,
    mode: DeliveryMode,
}

impl<T: Transport> RtmfpSession<T> {
    /// Opens a connection and starts exactly one delivery mode on it.
    ///
    /// The URI follows `rtmfp://server[:port]/app/playpath[ key=value ...]`;
    /// trailing space-separated pairs are folded into a snapshot of `options`
    /// before anything touches the network. Every step aborts the open on
    /// failure, and a failure after the connection was obtained releases it
    /// before the error is surfaced.
    pub fn open(
        mut transport: T,
        uri: &str,
        direction: Direction,
        options: &SessionOptions,
        interrupt: Interrupt,
    ) -> Result<RtmfpSession<T>, SessionError> {
        let (url, config) = apply_inline_options(uri, options)?;
        config.validate()?;

        let tuning = EngineTuning {
            socket_receive_size: config.socket_receive_size,
            socket_send_size: config.socket_send_size,
            fallback_timeout_ms: config.fallback_timeout_ms,
            log_level: logging::engine_level_for(log::max_level()),
        };
        transport.apply_tuning(&tuning);

        let parameters = SessionParameters {
            is_blocking: true,
            swf_url: config.swf_url.clone(),
            app: config.app.clone(),
            page_url: config.page_url.clone(),
            flash_version: config.flash_version.clone(),
            host: config.host.clone(),
            host_ipv6: config.host_ipv6.clone(),
        };

        // Callbacks go in before connect: the engine logs during negotiation
        // and polls the interrupt during its blocking waits.
        transport.set_log_callback(logging::forwarding_callback());
        transport.set_interrupt_callback(interrupt);

        let target = uri::resolve(&url)?;

        let connection = match transport.connect(&url, &parameters) {
            Some(connection) => connection,
            None => {
                warn!("The transport engine refused to connect to '{}'", url);
                return Err(SessionError::ConnectFailed);
            }
        };
        info!("RTMFP connect requested: {}", connection.0);

        match transport.wait_for_connection(connection) {
            WaitOutcome::Connected => {}
            WaitOutcome::Interrupted => {
                info!("Connection wait interrupted by the caller");
                transport.close(connection);
                return Err(SessionError::Interrupted);
            }
            WaitOutcome::Failed => {
                warn!("Connection to '{}' was never established", url);
                transport.close(connection);
                return Err(SessionError::ConnectTimeout);
            }
        }

        let mode = DeliveryMode::select(direction, &config);
        debug!(
            "Starting '{}' delivery for publication '{}'",
            mode, target.publication
        );

        let audio_buffered = !config.audio_unbuffered;
        let video_buffered = !config.video_unbuffered;
        let started = match &mode {
            DeliveryMode::PublishGroup(group) => transport.join_group(
                connection,
                &target.publication,
                &parameters,
                group,
                audio_buffered,
                video_buffered,
            ),
            DeliveryMode::ConnectPeer { peer_id } => {
                transport.connect_to_peer(connection, peer_id, &target.publication, true)
            }
            DeliveryMode::PublishP2P => transport.publish_p2p(
                connection,
                &target.publication,
                audio_buffered,
                video_buffered,
                true,
            ),
            DeliveryMode::PublishUnicast => transport.publish(
                connection,
                &target.publication,
                audio_buffered,
                video_buffered,
                true,
            ),
            DeliveryMode::PlayUnicast => transport.play(connection, &target.publication),
        };

        let stream = match started {
            Some(stream) => stream,
            None => {
                warn!(
                    "The '{}' delivery mode failed to start for '{}'",
                    mode, target.publication
                );
                transport.close(connection);
                return Err(SessionError::ModeStartFailed {
                    mode: mode.to_string(),
                });
            }
        };

        Ok(RtmfpSession {
            transport,
            connection,
            stream,
            mode,
        })
    }

    /// Sessions are always stream oriented: no seeking and no length queries
    pub fn is_streamed(&self) -> bool {
        true
    }

    /// The delivery mode this session was opened in
    pub fn mode(&self) -> &DeliveryMode {
        &self.mode
    }

    /// Reads media data, blocking until the engine has some.
    ///
    /// A count of zero signals the end of the stream and is not an error.
    /// Each call is a single attempt; a failed read should not be retried
    /// transparently.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize, SessionError> {
        let count = self.transport.read(self.stream, self.connection, buffer);
        if count < 0 {
            return Err(SessionError::IoFailed);
        }

        Ok(count as usize)
    }

    /// Writes media data, blocking until the engine accepts it.
    ///
    /// Any non-negative count the engine reports, including zero, is
    /// returned as is.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, SessionError> {
        let count = self.transport.write(self.connection, data);
        if count < 0 {
            return Err(SessionError::IoFailed);
        }

        Ok(count as usize)
    }

    /// Releases the connection and returns the transport.
    ///
    /// Teardown is best effort: it always succeeds from the caller's point of
    /// view regardless of what the engine does with the disconnect request.
    /// Consuming the session keeps the release from ever happening twice.
    pub fn close(mut self) -> T {
        info!("Closing RTMFP connection {}", self.connection.0);
        self.transport.close(self.connection);
        self.transport
    }
}

/// Splits trailing space-separated `key=value` arguments off the URI and
/// folds them into a snapshot of the caller's options
fn apply_inline_options(
    uri: &str,
    base: &SessionOptions,
) -> Result<(String, SessionOptions), SessionError> {
    let mut parts = uri.split_whitespace();
    let url = parts.next().unwrap_or("").to_string();

    let mut options = base.clone();
    for pair in parts {
        match pair.split_once('=') {
            Some((key, value)) => options.set(key, value)?,
            None => {
                return Err(SessionError::Config(OptionError::InvalidValue {
                    key: pair.to_string(),
                    value: String::new(),
                }))
            }
        }
    }

    Ok((url, options))
}
