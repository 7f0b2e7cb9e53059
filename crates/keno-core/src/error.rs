//! Error types for cage construction.

/// Errors raised while building cages.
///
/// Running cages never fail: picks and agitation rounds resolve every
/// shortage by waiting or by the configured [`UnderflowPolicy`](crate::UnderflowPolicy).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KenoError {
    /// A cage must hold at least one ball.
    #[error("cage capacity must be at least 1")]
    ZeroCapacity,

    /// Ball values are `u32`, so the capacity must fit.
    #[error("cage capacity {capacity} exceeds the largest ball number ({max})")]
    CapacityTooLarge { capacity: usize, max: u64 },

    /// Agitation needs at least one rotor blade.
    #[error("rotor blade count must be at least 1")]
    ZeroBlades,

    /// Blades hit at least once per second.
    #[error("blade hit frequency must be at least 1 per second")]
    ZeroFrequency,

    /// Blade periods are whole nanoseconds, so at most one hit per nanosecond.
    #[error("blade hit frequency {hz} exceeds {max} per second")]
    FrequencyTooHigh { hz: u32, max: u32 },
}

pub type KenoResult<T> = Result<T, KenoError>;
