//! Adapter for driving media sessions over an RTMFP transport engine.
//!
//! RTMFP is Adobe's peer-assisted streaming protocol. This crate does not
//! implement the wire protocol itself (framing, encryption, NAT traversal and
//! congestion control all live in an external engine such as librtmfp,
//! modeled here by the [`transport::Transport`] trait). What it does implement
//! is everything a media I/O framework needs around that engine: URI
//! resolution, option parsing and validation, connection establishment,
//! selection of exactly one delivery mode, blocking stream reads and writes,
//! and teardown.
//!
//! URI syntax: `rtmfp://server[:port]/app/playpath[ key=value ...]`
//! where `app` is the first one or two directories in the path
//! (e.g. `/ondemand/`, `/flash/live/`, etc.) and `playpath` is the rest of
//! the path, optionally prefixed with `mp4:`. Additional engine options may
//! be appended as space-separated key=value pairs after the URI; the
//! recognized keys are documented on [`options::SessionOptions`].

pub mod logging;
pub mod options;
pub mod session;
pub mod transport;
pub mod uri;

pub use self::options::{OptionError, SessionOptions};
pub use self::session::{DeliveryMode, Direction, RtmfpSession, SessionError};
pub use self::transport::{
    ConnectionId, EngineTuning, GroupParameters, Interrupt, LogCallback, SessionParameters,
    StreamId, Transport, WaitOutcome,
};
pub use self::uri::{resolve, ResolvedTarget, UriError};
