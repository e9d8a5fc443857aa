//! Translation between the transport engine's log levels and the `log` crate.
//!
//! The engine reports on an eight point scale: 1 is fatal, 2 and 3 are error
//! sub-levels, 4 is warn, 5 and 6 are info sub-levels, 7 is debug and 8 is
//! trace. Hosts use the coarser `log` facade. Both directions are fixed
//! lookup tables rather than arithmetic so an engine update that adds levels
//! can never panic this layer.

use log::{Level, LevelFilter};

use crate::transport::LogCallback;

/// Returns the host severity for an engine log level.
///
/// Levels outside the known 1 to 8 range map to `Error`, the same bucket as
/// fatal (the `log` facade has no fatal severity).
pub fn host_level_for(engine_level: u32) -> Level {
    match engine_level {
        2 | 3 => Level::Error,
        4 => Level::Warn,
        5 | 6 => Level::Info,
        7 => Level::Debug,
        8 => Level::Trace,
        _ => Level::Error,
    }
}

/// Returns the human readable tag for an engine log level, as prefixed onto
/// forwarded log lines.
pub fn level_name(engine_level: u32) -> &'static str {
    match engine_level {
        2 | 3 => "ERROR",
        4 => "WARN",
        5 | 6 => "INFO",
        7 => "DEBUG",
        8 => "TRACE",
        _ => "FATAL",
    }
}

/// Returns the engine log level matching a host level filter.
///
/// Always in the engine's 1 to 8 range; `Info` is the engine's level 6 and
/// the default for anything without a direct equivalent. `Off` maps to 1 so
/// a silenced host still receives fatal diagnostics it can discard.
pub fn engine_level_for(filter: LevelFilter) -> u32 {
    match filter {
        LevelFilter::Off => 1,
        LevelFilter::Error => 3,
        LevelFilter::Warn => 4,
        LevelFilter::Info => 6,
        LevelFilter::Debug => 7,
        LevelFilter::Trace => 8,
    }
}

/// Builds the callback handed to the engine for its log lines.
///
/// Every engine log line is forwarded to the host sink under the `rtmfp`
/// target as `[LEVEL] message`.
pub fn forwarding_callback() -> LogCallback {
    Box::new(|engine_level, message| {
        log::log!(
            target: "rtmfp",
            host_level_for(engine_level),
            "[{}] {}",
            level_name(engine_level),
            message
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_engine_level_maps_to_a_host_severity() {
        let expected = [
            (1, Level::Error, "FATAL"),
            (2, Level::Error, "ERROR"),
            (3, Level::Error, "ERROR"),
            (4, Level::Warn, "WARN"),
            (5, Level::Info, "INFO"),
            (6, Level::Info, "INFO"),
            (7, Level::Debug, "DEBUG"),
            (8, Level::Trace, "TRACE"),
        ];

        for (engine_level, level, name) in expected {
            assert_eq!(
                host_level_for(engine_level),
                level,
                "Wrong host level for engine level {}",
                engine_level
            );
            assert_eq!(
                level_name(engine_level),
                name,
                "Wrong tag for engine level {}",
                engine_level
            );
        }
    }

    #[test]
    fn unknown_engine_levels_fall_back_to_the_error_severity() {
        for engine_level in [0, 9, 100, u32::MAX] {
            assert_eq!(host_level_for(engine_level), Level::Error);
            assert_eq!(level_name(engine_level), "FATAL");
        }
    }

    #[test]
    fn every_host_filter_maps_into_the_engine_range() {
        let filters = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];

        for filter in filters {
            let engine_level = engine_level_for(filter);
            assert!(
                (1..=8).contains(&engine_level),
                "Engine level {} for {:?} is out of range",
                engine_level,
                filter
            );
        }

        assert_eq!(engine_level_for(LevelFilter::Info), 6);
        assert_eq!(engine_level_for(LevelFilter::Error), 3);
        assert_eq!(engine_level_for(LevelFilter::Trace), 8);
    }

    #[test]
    fn forwarding_callback_accepts_any_engine_level() {
        let callback = forwarding_callback();
        for engine_level in 0..=10 {
            callback(engine_level, "message from the engine");
        }
    }
}
