//! The abstract surface of the RTMFP transport engine.
//!
//! The engine (librtmfp or a drop-in equivalent) owns all protocol work:
//! handshakes, encryption, NAT traversal, peer discovery and congestion
//! control. Sessions only ever talk to it through the [`Transport`] trait, so
//! every session can be constructed against its own engine instance and
//! tested against a mock one.
//!
//! All operations are documented as blocking. During long waits the engine is
//! expected to poll the installed [`Interrupt`] and abort early when it
//! reports true.

use std::fmt;
use std::sync::Arc;

/// Identifies an open connection within the transport engine.
///
/// Returned by a successful connect and required for every subsequent
/// operation, including teardown.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConnectionId(pub u32);

/// Identifies a single media stream multiplexed within a connection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StreamId(pub u16);

/// Engine-wide tuning values, applied once before a connection is requested.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineTuning {
    /// Socket receive buffer size in bytes
    pub socket_receive_size: u32,

    /// Socket send buffer size in bytes
    pub socket_send_size: u32,

    /// Milliseconds before the engine falls back from a group to the
    /// configured unicast url
    pub fallback_timeout_ms: u32,

    /// Engine log verbosity on its 1 (fatal) to 8 (trace) scale
    pub log_level: u32,
}

/// Identity and bind parameters for a single session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionParameters {
    /// Whether engine calls block until completion. Always true; the engine
    /// offers no usable non-blocking mode at this layer.
    pub is_blocking: bool,

    /// URL of the SWF player, sent during the connect exchange
    pub swf_url: Option<String>,

    /// Name of the application to connect to on the server
    pub app: Option<String>,

    /// URL of the web page the media was embedded in
    pub page_url: Option<String>,

    /// Version string of the flash plugin to present
    pub flash_version: Option<String>,

    /// IPv4 host address to bind to
    pub host: Option<String>,

    /// IPv6 host address to bind to
    pub host_ipv6: Option<String>,
}

/// Parameters for joining or creating a p2p multicast group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupParameters {
    /// Identifier of the group to join or create
    pub netgroup: String,

    /// Interval in milliseconds between fragment availability messages
    pub availability_update_period_ms: u32,

    /// Duration in milliseconds of the multicast reassembly window
    pub window_duration_ms: u32,

    /// Maximum number (minus one) of peers push fragments are sent to
    pub push_limit: u8,

    /// Whether this member publishes into the group rather than consuming
    pub is_publisher: bool,

    /// Whether group operations block until completion. Always true.
    pub is_blocking: bool,

    /// Disables the p2p connection rate control to avoid disconnections
    pub disable_rate_control: bool,

    /// Unicast url to play while the group connection is not yet ready
    pub fallback_url: Option<String>,
}

/// A poll-style cancellation check supplied by the caller.
///
/// The engine consults it during blocking waits and aborts early once it
/// reports true. A session opened with [`Interrupt::none`] can only be
/// unblocked by the engine itself.
#[derive(Clone)]
pub struct Interrupt {
    check: Option<Arc<dyn Fn() -> bool + Send + Sync>>,
}

impl Interrupt {
    /// An interrupt that never fires
    pub fn none() -> Interrupt {
        Interrupt { check: None }
    }

    /// Wraps a caller-supplied poll function
    pub fn from_fn(check: impl Fn() -> bool + Send + Sync + 'static) -> Interrupt {
        Interrupt {
            check: Some(Arc::new(check)),
        }
    }

    /// Returns true once the caller has requested cancellation
    pub fn is_set(&self) -> bool {
        match &self.check {
            Some(check) => check(),
            None => false,
        }
    }
}

impl fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.check {
            Some(_) => write!(f, "Interrupt(set: {})", self.is_set()),
            None => write!(f, "Interrupt(none)"),
        }
    }
}

/// Sink for engine log lines: numeric engine level plus the message text
pub type LogCallback = Box<dyn Fn(u32, &str) + Send>;

/// Result of waiting for the connected event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WaitOutcome {
    /// The engine reported the connection as established
    Connected,

    /// The engine gave up before the connection was established
    Failed,

    /// The caller's interrupt fired during the wait
    Interrupted,
}

/// Operations the transport engine exposes to a session.
///
/// The mode-start operations (`join_group`, `connect_to_peer`, `publish_p2p`,
/// `publish`, `play`) and the `connect` call keep the engine's C-style
/// contract of a zero handle meaning failure, expressed here as `None`.
/// `read` and `write` likewise keep the engine's convention of a negative
/// count meaning failure and zero meaning end of stream (reads) or nothing
/// accepted (writes).
pub trait Transport {
    /// Pushes engine-wide tuning values. Must happen before `connect`.
    fn apply_tuning(&mut self, tuning: &EngineTuning);

    /// Installs the sink for engine log lines. Must happen before `connect`
    /// as the engine logs during negotiation.
    fn set_log_callback(&mut self, callback: LogCallback);

    /// Installs the cancellation check polled during blocking waits
    fn set_interrupt_callback(&mut self, interrupt: Interrupt);

    /// Requests a connection to the server named by `url`
    fn connect(&mut self, url: &str, parameters: &SessionParameters) -> Option<ConnectionId>;

    /// Blocks until the connection is established, fails or is interrupted
    fn wait_for_connection(&mut self, connection: ConnectionId) -> WaitOutcome;

    /// Joins (or creates) a multicast group for the publication
    fn join_group(
        &mut self,
        connection: ConnectionId,
        publication: &str,
        parameters: &SessionParameters,
        group: &GroupParameters,
        audio_buffered: bool,
        video_buffered: bool,
    ) -> Option<StreamId>;

    /// Connects directly to a single peer and plays its publication
    fn connect_to_peer(
        &mut self,
        connection: ConnectionId,
        peer_id: &str,
        publication: &str,
        blocking: bool,
    ) -> Option<StreamId>;

    /// Publishes the stream for p2p consumption
    fn publish_p2p(
        &mut self,
        connection: ConnectionId,
        publication: &str,
        audio_buffered: bool,
        video_buffered: bool,
        blocking: bool,
    ) -> Option<StreamId>;

    /// Publishes the stream unicast to the server
    fn publish(
        &mut self,
        connection: ConnectionId,
        publication: &str,
        audio_buffered: bool,
        video_buffered: bool,
        blocking: bool,
    ) -> Option<StreamId>;

    /// Plays a unicast stream from the server
    fn play(&mut self, connection: ConnectionId, publication: &str) -> Option<StreamId>;

    /// Reads media data. Streams are multiplexed within a connection, so
    /// reads need both identifiers.
    fn read(&mut self, stream: StreamId, connection: ConnectionId, buffer: &mut [u8]) -> isize;

    /// Writes media data over the connection
    fn write(&mut self, connection: ConnectionId, data: &[u8]) -> isize;

    /// Releases the connection. Best effort; never reports an outcome.
    fn close(&mut self, connection: ConnectionId);
}
