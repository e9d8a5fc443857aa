//! The named, typed, bounded option surface consumed at session open time.

mod errors;


pub use self::errors::OptionError;

/// Configuration options that govern how an RTMFP session should operate.
///
/// One field per recognized key. Numeric options carry inclusive bounds that
/// are enforced both when parsed through [`SessionOptions::set`] and again by
/// [`SessionOptions::validate`] before any network activity, so a value that
/// was poked into a public field directly still cannot reach the engine out
/// of range.
///
/// Recognized keys: `socketreceivesize`, `socketsendsize`, `audiounbuffered`,
/// `videounbuffered`, `peerid`, `p2ppublishing`, `netgroup`, `fallbackurl`,
/// `fallbacktimeout`, `disableratecontrol`, `pushlimit`, `updateperiod`,
/// `windowduration`, `swfurl`, `app`, `pageurl`, `flashver`, `host` and
/// `hostipv6`.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOptions {
    /// Socket receive buffer size in bytes, in [0, 0x0FFFFFFF]
    pub socket_receive_size: u32,

    /// Socket send buffer size in bytes, in [0, 0x0FFFFFFF]
    pub socket_send_size: u32,

    /// Request unbuffered audio delivery
    pub audio_unbuffered: bool,

    /// Request unbuffered video delivery
    pub video_unbuffered: bool,

    /// Peer identifier to connect to directly for playing
    pub peer_id: Option<String>,

    /// Publish the stream in p2p mode instead of unicast
    pub p2p_publishing: bool,

    /// NetGroup id to connect to or create a p2p multicast group
    pub netgroup: Option<String>,

    /// Unicast stream url to play until the group connection is ready
    pub fallback_url: Option<String>,

    /// Milliseconds before falling back to unicast, in [0, 120000]
    pub fallback_timeout_ms: u32,

    /// Disable the p2p connection rate control to avoid disconnections
    pub disable_rate_control: bool,

    /// Maximum number (minus one) of peers to push fragments to, in [0, 255]
    pub push_limit: u8,

    /// Milliseconds between fragment availability messages, in [100, 10000]
    pub update_period_ms: u32,

    /// Milliseconds of multicast reassembly window, in [1000, 60000]
    pub window_duration_ms: u32,

    /// URL of the SWF player. No value is sent by default.
    pub swf_url: Option<String>,

    /// Name of the application to connect to on the server
    pub app: Option<String>,

    /// URL of the web page the media was embedded in
    pub page_url: Option<String>,

    /// Version of the flash plugin presented to the server
    pub flash_version: Option<String>,

    /// IPv4 host address to bind to (for hosts with multiple interfaces)
    pub host: Option<String>,

    /// IPv6 host address to bind to (for hosts with multiple interfaces)
    pub host_ipv6: Option<String>,
}

impl SessionOptions {
    /// Creates a new option set with default values
    pub fn new() -> SessionOptions {
        SessionOptions {
            socket_receive_size: 212992,
            socket_send_size: 212992,
            audio_unbuffered: false,
            video_unbuffered: false,
            peer_id: None,
            p2p_publishing: false,
            netgroup: None,
            fallback_url: None,
            fallback_timeout_ms: 8000,
            disable_rate_control: false,
            push_limit: 4,
            update_period_ms: 100,
            window_duration_ms: 8000,
            swf_url: None,
            app: None,
            page_url: None,
            flash_version: None,
            host: None,
            host_ipv6: None,
        }
    }

    /// Builds an option set from key/value pairs, failing on the first
    /// unknown key, unparsable value or out of bounds value
    pub fn from_key_values<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<SessionOptions, OptionError> {
        let mut options = SessionOptions::new();
        for (key, value) in pairs {
            options.set(key, value)?;
        }

        Ok(options)
    }

    /// Sets a single option from its textual key and value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionError> {
        match key {
            "socketreceivesize" => {
                self.socket_receive_size = parse_int(key, value, 0, 0x0FFF_FFFF)? as u32
            }
            "socketsendsize" => {
                self.socket_send_size = parse_int(key, value, 0, 0x0FFF_FFFF)? as u32
            }
            "audiounbuffered" => self.audio_unbuffered = parse_bool(key, value)?,
            "videounbuffered" => self.video_unbuffered = parse_bool(key, value)?,
            "peerid" => self.peer_id = Some(value.to_string()),
            "p2ppublishing" => self.p2p_publishing = parse_bool(key, value)?,
            "netgroup" => self.netgroup = Some(value.to_string()),
            "fallbackurl" => self.fallback_url = Some(value.to_string()),
            "fallbacktimeout" => {
                self.fallback_timeout_ms = parse_int(key, value, 0, 120_000)? as u32
            }
            "disableratecontrol" => self.disable_rate_control = parse_bool(key, value)?,
            "pushlimit" => self.push_limit = parse_int(key, value, 0, 255)? as u8,
            "updateperiod" => self.update_period_ms = parse_int(key, value, 100, 10_000)? as u32,
            "windowduration" => {
                self.window_duration_ms = parse_int(key, value, 1_000, 60_000)? as u32
            }
            "swfurl" => self.swf_url = Some(value.to_string()),
            "app" => self.app = Some(value.to_string()),
            "pageurl" => self.page_url = Some(value.to_string()),
            "flashver" => self.flash_version = Some(value.to_string()),
            "host" => self.host = Some(value.to_string()),
            "hostipv6" => self.host_ipv6 = Some(value.to_string()),
            _ => return Err(OptionError::UnknownKey(key.to_string())),
        }

        Ok(())
    }

    /// Re-checks every bounded numeric field, for option sets whose fields
    /// were assigned directly rather than going through [`SessionOptions::set`]
    pub fn validate(&self) -> Result<(), OptionError> {
        check_bounds(
            "socketreceivesize",
            self.socket_receive_size as i64,
            0,
            0x0FFF_FFFF,
        )?;
        check_bounds(
            "socketsendsize",
            self.socket_send_size as i64,
            0,
            0x0FFF_FFFF,
        )?;
        check_bounds(
            "fallbacktimeout",
            self.fallback_timeout_ms as i64,
            0,
            120_000,
        )?;
        check_bounds("updateperiod", self.update_period_ms as i64, 100, 10_000)?;
        check_bounds(
            "windowduration",
            self.window_duration_ms as i64,
            1_000,
            60_000,
        )?;

        Ok(())
    }
}

impl Default for SessionOptions {
    fn default() -> SessionOptions {
        SessionOptions::new()
    }
}

fn parse_int(key: &str, value: &str, min: i64, max: i64) -> Result<i64, OptionError> {
    let parsed = value
        .trim()
        .parse::<i64>()
        .map_err(|_| OptionError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;

    check_bounds(key, parsed, min, max)?;
    Ok(parsed)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionError> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(OptionError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn check_bounds(key: &str, value: i64, min: i64, max: i64) -> Result<(), OptionError> {
    if value < min || value > max {
        return Err(OptionError::OutOfBounds {
            key: key.to_string(),
            value,
            min,
            max,
        });
    }

    Ok(())
}
