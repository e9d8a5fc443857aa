use std::fmt;

use crate::options::SessionOptions;
use crate::transport::GroupParameters;

use super::Direction;

/// The delivery mode a session runs in.
///
/// Decided exactly once, at open time, from the option set and the requested
/// direction. The five modes are mutually exclusive; when a request supplies
/// more than one selector the higher priority branch wins silently
/// (group > peer > p2p publish > write > play).
#[derive(Clone, Debug, PartialEq)]
pub enum DeliveryMode {
    /// Join or create a p2p multicast group for the publication
    PublishGroup(GroupParameters),

    /// Connect directly to a single peer and play its publication
    ConnectPeer { peer_id: String },

    /// Publish the publication for p2p consumption
    PublishP2P,

    /// Publish the publication unicast to the server
    PublishUnicast,

    /// Play the publication unicast from the server
    PlayUnicast,
}

impl DeliveryMode {
    /// Picks the delivery mode for a session, first match wins
    pub fn select(direction: Direction, options: &SessionOptions) -> DeliveryMode {
        if let Some(netgroup) = &options.netgroup {
            // FFmpeg's librtmfp protocol derives the publisher flag from
            // `(flags & AVIO_FLAG_WRITE) > 1`, which only holds because the
            // write flag happens to be 2. The intent is publisher iff the
            // session was opened for writing.
            DeliveryMode::PublishGroup(GroupParameters {
                netgroup: netgroup.clone(),
                availability_update_period_ms: options.update_period_ms,
                window_duration_ms: options.window_duration_ms,
                push_limit: options.push_limit,
                is_publisher: direction == Direction::Write,
                is_blocking: true,
                disable_rate_control: options.disable_rate_control,
                fallback_url: options.fallback_url.clone(),
            })
        } else if let Some(peer_id) = &options.peer_id {
            DeliveryMode::ConnectPeer {
                peer_id: peer_id.clone(),
            }
        } else if options.p2p_publishing {
            DeliveryMode::PublishP2P
        } else if direction == Direction::Write {
            DeliveryMode::PublishUnicast
        } else {
            DeliveryMode::PlayUnicast
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DeliveryMode::PublishGroup(_) => "netgroup",
            DeliveryMode::ConnectPeer { .. } => "direct peer",
            DeliveryMode::PublishP2P => "p2p publish",
            DeliveryMode::PublishUnicast => "unicast publish",
            DeliveryMode::PlayUnicast => "unicast play",
        };

        f.write_str(name)
    }
}
