//! Versioned JSON envelope for the stored best time
//!
//! Older saves held a bare integer string; those still load.

use serde::{Deserialize, Serialize};

/// Current envelope version
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTimeEnvelope {
    pub version: u32,
    pub best_time_secs: u64,
}

impl BestTimeEnvelope {
    pub fn new(best_time_secs: u64) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            best_time_secs,
        }
    }
}

pub fn encode(best_time_secs: u64) -> Result<String, serde_json::Error> {
    serde_json::to_string(&BestTimeEnvelope::new(best_time_secs))
}

/// Decode a stored value. Anything unreadable (including a newer version)
/// counts as no best time.
pub fn decode(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(env) = serde_json::from_str::<BestTimeEnvelope>(raw) {
        if env.version <= ENVELOPE_VERSION {
            return env.best_time_secs;
        }
        log::warn!("Best time envelope version {} not supported", env.version);
        return 0;
    }
    match raw.parse::<u64>() {
        Ok(legacy) => legacy,
        Err(_) => {
            if !raw.is_empty() {
                log::warn!("Ignoring unreadable best time {:?}", raw);
            }
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_shape() {
        let json = encode(42).expect("encodes");
        assert_eq!(json, r#"{"version":1,"best_time_secs":42}"#);
        assert_eq!(decode(&json), 42);
    }

    #[test]
    fn test_legacy_integer() {
        assert_eq!(decode("17"), 17);
        assert_eq!(decode(" 5\n"), 5);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(decode(""), 0);
        assert_eq!(decode("abc"), 0);
        assert_eq!(decode("-3"), 0);
        assert_eq!(decode("12.5"), 0);
        assert_eq!(decode(r#"{"best":3}"#), 0);
        assert_eq!(decode(r#"{"version":9,"best_time_secs":3}"#), 0);
    }
}
