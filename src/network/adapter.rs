//! Core network types for adapter representation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Speed value the adapter table uses for "speed unknown".
///
/// Platform fetchers normalise their own unknown marker to this value so
/// it is never mistaken for a real link speed.
pub const SPEED_UNKNOWN: u64 = i64::MAX.unsigned_abs();

/// Hardware (MAC) address identifying the adapter to watch.
///
/// # Parsing
///
/// Accepts six hex octets separated by `:` or `-`, or twelve bare hex
/// digits. Case is ignored. Displayed in the upper-case, colon-separated
/// form the adapter table reports (`AA:BB:CC:DD:EE:FF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareId([u8; 6]);

impl HardwareId {
    /// Creates an identifier from raw octets.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the raw octets.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Builds an identifier from an OS-provided address buffer.
    ///
    /// Returns `None` unless exactly six octets are supplied; adapters
    /// without an Ethernet-style address (tunnels, loopback) have none.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 6]>::try_from(bytes).ok().map(Self)
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Error returned when a hardware identifier string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected six hex octets like 'AA:BB:CC:DD:EE:FF', got '{input}'")]
pub struct ParseHardwareIdError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for HardwareId {
    type Err = ParseHardwareIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseHardwareIdError {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let digits: String = if trimmed.contains([':', '-']) {
            let groups: Vec<&str> = trimmed.split([':', '-']).collect();
            if groups.len() != 6 || groups.iter().any(|g| g.len() != 2) {
                return Err(invalid());
            }
            groups.concat()
        } else {
            trimmed.to_string()
        };

        if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(octets))
    }
}

/// One adapter row as reported by the operating system.
///
/// Optional fields model values the OS may leave null; they are folded
/// into defaults by [`super::MatchingQuery`], never treated as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The friendly name of the adapter (e.g., "Ethernet", "eth0").
    pub name: String,
    /// Hardware address, if the adapter has one.
    pub hardware_id: Option<HardwareId>,
    /// OS-reported link-enabled flag.
    pub enabled: Option<bool>,
    /// Negotiated speed in bits per second.
    pub speed_bps: Option<u64>,
}

impl LinkRecord {
    /// Creates a record with all fields present.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        hardware_id: Option<HardwareId>,
        enabled: Option<bool>,
        speed_bps: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            hardware_id,
            enabled,
            speed_bps,
        }
    }
}

/// One raw read of the watched adapter.
///
/// `enabled` is meaningless when `!found`; `speed_bps` is meaningless
/// unless the adapter is both found and enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterSnapshot {
    /// Whether an adapter with the configured identifier exists.
    pub found: bool,
    /// OS-reported link-enabled flag.
    pub enabled: bool,
    /// Negotiated link speed in bits per second.
    pub speed_bps: u64,
}

impl AdapterSnapshot {
    /// Snapshot for an adapter that could not be observed.
    pub const NOT_FOUND: Self = Self {
        found: false,
        enabled: false,
        speed_bps: 0,
    };

    /// Snapshot for a present adapter.
    #[must_use]
    pub const fn found(enabled: bool, speed_bps: u64) -> Self {
        Self {
            found: true,
            enabled,
            speed_bps,
        }
    }
}

impl From<&LinkRecord> for AdapterSnapshot {
    fn from(record: &LinkRecord) -> Self {
        Self::found(
            record.enabled.unwrap_or(false),
            record.speed_bps.unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hardware_id {
        use super::*;

        const OCTETS: [u8; 6] = [0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e];

        #[test]
        fn parses_colon_separated() {
            let id: HardwareId = "00:1A:2B:3C:4D:5E".parse().unwrap();
            assert_eq!(id.octets(), OCTETS);
        }

        #[test]
        fn parses_dash_separated_lowercase() {
            let id: HardwareId = "00-1a-2b-3c-4d-5e".parse().unwrap();
            assert_eq!(id.octets(), OCTETS);
        }

        #[test]
        fn parses_bare_digits_with_whitespace() {
            let id: HardwareId = "  001a2b3c4d5e\n".parse().unwrap();
            assert_eq!(id.octets(), OCTETS);
        }

        #[test]
        fn rejects_short_input() {
            assert!("00:1A:2B:3C:4D".parse::<HardwareId>().is_err());
        }

        #[test]
        fn rejects_non_hex() {
            let err = "00:1A:2B:3C:4D:ZZ".parse::<HardwareId>().unwrap_err();
            assert!(err.to_string().contains("00:1A:2B:3C:4D:ZZ"));
        }

        #[test]
        fn rejects_uneven_groups() {
            assert!("001:A2:B3:C4:D5:E".parse::<HardwareId>().is_err());
        }

        #[test]
        fn rejects_empty() {
            assert!("".parse::<HardwareId>().is_err());
        }

        #[test]
        fn display_is_upper_colon_form() {
            let id = HardwareId::new(OCTETS);
            assert_eq!(id.to_string(), "00:1A:2B:3C:4D:5E");
        }

        #[test]
        fn display_round_trips_through_parse() {
            let id = HardwareId::new(OCTETS);
            assert_eq!(id.to_string().parse::<HardwareId>().unwrap(), id);
        }

        #[test]
        fn from_slice_requires_six_octets() {
            assert_eq!(HardwareId::from_slice(&OCTETS), Some(HardwareId::new(OCTETS)));
            assert_eq!(HardwareId::from_slice(&OCTETS[..4]), None);
            assert_eq!(HardwareId::from_slice(&[]), None);
        }
    }

    mod adapter_snapshot {
        use super::*;

        #[test]
        fn not_found_is_all_default() {
            assert_eq!(AdapterSnapshot::NOT_FOUND, AdapterSnapshot::default());
        }

        #[test]
        fn from_record_folds_null_fields() {
            let record = LinkRecord::new("eth0", None, None, None);
            let snapshot = AdapterSnapshot::from(&record);

            assert!(snapshot.found);
            assert!(!snapshot.enabled);
            assert_eq!(snapshot.speed_bps, 0);
        }

        #[test]
        fn from_record_keeps_present_fields() {
            let record = LinkRecord::new("eth0", None, Some(true), Some(1_000_000_000));
            let snapshot = AdapterSnapshot::from(&record);

            assert_eq!(snapshot, AdapterSnapshot::found(true, 1_000_000_000));
        }
    }
}
