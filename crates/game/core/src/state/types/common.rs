use std::fmt;
use std::time::Duration;

/// Unique identifier for any entity tracked by the host simulation.
///
/// Identity is stable for the entity's current life; hosts may reuse an id
/// after the entity has been removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Point on the simulation timeline, measured from the scheduler epoch.
///
/// The timeline only moves when the host advances its scheduler, so two reads
/// within the same frame always observe the same timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub Duration);

impl Timestamp {
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Time elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    pub fn as_secs_f32(self) -> f32 {
        self.0.as_secs_f32()
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0.as_secs_f64())
    }
}

/// Current and maximum health of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub current: f32,
    pub maximum: f32,
}

impl Vitals {
    pub fn new(current: f32, maximum: f32) -> Self {
        Self { current, maximum }
    }

    /// Health after raising the ceiling by `max_increase` and restoring `amount`.
    ///
    /// The restored value never exceeds the new ceiling.
    pub fn healed(self, amount: f32, max_increase: f32) -> Self {
        let maximum = self.maximum + max_increase;
        Self {
            current: (self.current + amount).min(maximum),
            maximum,
        }
    }
}
