//! Classified adapter state.

use crate::network::{AdapterSnapshot, SPEED_UNKNOWN};

/// The classified, comparable view of the adapter used for reporting.
///
/// # Equality
///
/// Compared by value over all three fields; any difference is a
/// transition. A state that is not connected always carries speed 0, so
/// two disconnected samples compare equal regardless of the raw speed
/// the OS reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterState {
    found: bool,
    connected: bool,
    speed_bps: u64,
}

/// The three observable states of the watched adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No adapter with the configured identifier.
    NoAdapter,
    /// Adapter present but link down, disabled or speed unknown.
    Disconnected,
    /// Link up at the given speed (bits per second).
    Connected(u64),
}

impl Phase {
    /// Stable lower-case name, used in webhook payloads.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoAdapter => "no-adapter",
            Self::Disconnected => "disconnected",
            Self::Connected(_) => "connected",
        }
    }
}

impl AdapterState {
    /// The adapter could not be found.
    pub const NO_ADAPTER: Self = Self {
        found: false,
        connected: false,
        speed_bps: 0,
    };

    /// The adapter exists but has no usable link.
    pub const DISCONNECTED: Self = Self {
        found: true,
        connected: false,
        speed_bps: 0,
    };

    /// State for an enabled adapter reporting `speed_bps`.
    ///
    /// Goes through [`classify`], so a zero or unknown speed yields
    /// [`Self::DISCONNECTED`].
    #[must_use]
    pub const fn connected(speed_bps: u64) -> Self {
        classify(AdapterSnapshot::found(true, speed_bps))
    }

    /// Whether the adapter exists.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.found
    }

    /// Whether the link is up with a known speed.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Negotiated speed; `0` unless connected.
    #[must_use]
    pub const fn speed_bps(&self) -> u64 {
        self.speed_bps
    }

    /// Returns which of the three observable states this is.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match (self.found, self.connected) {
            (false, _) => Phase::NoAdapter,
            (true, false) => Phase::Disconnected,
            (true, true) => Phase::Connected(self.speed_bps),
        }
    }
}

/// Maps a raw snapshot to one of the three states.
///
/// Pure and total. A speed of 0 or [`SPEED_UNKNOWN`] is never reported
/// as a real speed.
#[must_use]
pub const fn classify(snapshot: AdapterSnapshot) -> AdapterState {
    if !snapshot.found {
        return AdapterState::NO_ADAPTER;
    }

    if !snapshot.enabled || snapshot.speed_bps == 0 || snapshot.speed_bps == SPEED_UNKNOWN {
        return AdapterState::DISCONNECTED;
    }

    AdapterState {
        found: true,
        connected: true,
        speed_bps: snapshot.speed_bps,
    }
}
