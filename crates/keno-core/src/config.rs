use crate::error::{KenoError, KenoResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of rotor blades agitating each cage.
pub const DEFAULT_BLADES: usize = 5;
/// How often per second a blade hits some balls.
pub const DEFAULT_HIT_FREQUENCY: u32 = 5;
/// Highest frequency that still leaves a non-zero blade period.
pub const MAX_HIT_FREQUENCY: u32 = 1_000_000_000;

/// What an agitation round reinserts for a hit slot it could not fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnderflowPolicy {
    /// Reinsert ball `0` for every empty slot.
    ///
    /// This is a known defect kept for compatibility: the cage ends up with
    /// duplicate zeros and more balls than slots, and blades that cannot
    /// reinsert wait until a picker or another blade frees room.
    #[default]
    ZeroFill,
    /// Reinsert only the balls actually taken.
    Skip,
}

/// Tuning for a single cage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CageConfig {
    pub capacity: usize,
    pub blades: usize,
    pub hit_frequency: u32,
    pub underflow: UnderflowPolicy,
    /// Start rotor blades when the cage fills. A still cage only moves
    /// balls through picks.
    pub agitation: bool,
}

impl Default for CageConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            blades: DEFAULT_BLADES,
            hit_frequency: DEFAULT_HIT_FREQUENCY,
            underflow: UnderflowPolicy::default(),
            agitation: true,
        }
    }
}

impl CageConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> KenoResult<()> {
        if self.capacity == 0 {
            return Err(KenoError::ZeroCapacity);
        }
        if self.capacity as u64 > u64::from(u32::MAX) {
            return Err(KenoError::CapacityTooLarge {
                capacity: self.capacity,
                max: u64::from(u32::MAX),
            });
        }
        if self.blades == 0 {
            return Err(KenoError::ZeroBlades);
        }
        if self.hit_frequency == 0 {
            return Err(KenoError::ZeroFrequency);
        }
        if self.hit_frequency > MAX_HIT_FREQUENCY {
            return Err(KenoError::FrequencyTooHigh {
                hz: self.hit_frequency,
                max: MAX_HIT_FREQUENCY,
            });
        }
        Ok(())
    }

    /// Balls each blade tries to grab per round.
    pub fn hits_per_round(&self) -> usize {
        self.capacity / self.blades
    }

    /// Tick period of a blade: one second divided by the hit frequency.
    pub fn hit_period(&self) -> Duration {
        Duration::from_secs(1) / self.hit_frequency.max(1)
    }
}
