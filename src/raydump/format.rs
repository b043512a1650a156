//! Ray dump format constants.

/// First i32 of a versioned dump.
pub const RAYDUMP_MAGIC: i32 = 1234;

/// Versioned layout whose records carry the hit distance `t`.
pub const VERSION_WITH_T: i32 = 1;

/// Versioned layout without hit distances.
pub const VERSION_WITHOUT_T: i32 = 2;

/// Shadow rays with a hit distance above this reached their light.
/// Occluded rays store the distance to the blocker, which is always
/// well below it in the recorded scenes.
pub const CONNECTED_T_THRESHOLD: f32 = 10000.0;

/// Hit distance written for connected shadow rays.
pub const CONNECTED_T: f32 = f32::MAX;

/// Required value of the trailing i32 of each versioned record.
pub const RECORD_FOOTER: i32 = 0;

/// Size of the versioned header (magic, version, ray count).
pub const VERSIONED_HEADER_SIZE: u64 = 12;

/// Record types in the versioned layout.
pub const VERSIONED_TYPE_CAST: i32 = 0;
pub const VERSIONED_TYPE_SHADOW: i32 = 1;

/// Record types in the legacy layout.
pub const LEGACY_TYPE_CAST_HIT: i32 = 0;
pub const LEGACY_TYPE_CAST_MISS: i32 = 1;
pub const LEGACY_TYPE_SHADOW_BLOCKED: i32 = 2;
pub const LEGACY_TYPE_SHADOW_CONNECTED: i32 = 3;

/// Legacy end of stream sentinel.
pub const LEGACY_END_OF_STREAM: i32 = 9215;

/// Which of the two on-disk layouts a dump uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpLayout {
    /// `RAYDUMP_MAGIC`, version, ray count, then fixed-size records.
    Versioned { with_t: bool },
    /// Typed records with depth, closed by `LEGACY_END_OF_STREAM`.
    Legacy,
}

impl DumpLayout {
    /// Version number written in the header, if the layout has one.
    pub fn version(self) -> Option<i32> {
        match self {
            Self::Versioned { with_t: true } => Some(VERSION_WITH_T),
            Self::Versioned { with_t: false } => Some(VERSION_WITHOUT_T),
            Self::Legacy => None,
        }
    }

    /// Record size in bytes.
    pub fn record_size(self) -> u64 {
        match self {
            // type, origin, direction, [t], footer
            Self::Versioned { with_t } => 4 + 12 + 12 + if with_t { 4 } else { 0 } + 4,
            // type, depth, origin, direction
            Self::Legacy => 4 + 4 + 12 + 12,
        }
    }
}

/// Classify a shadow record by its stored hit distance.
#[inline]
pub fn is_connected_t(t: f32) -> bool {
    t > CONNECTED_T_THRESHOLD
}
