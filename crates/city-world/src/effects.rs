//! Global visual effects.  The engine only owns the countdowns; jitter is a
//! rendering concern.

/// Ticks a world shake lasts once triggered.
pub const SHAKE_DURATION_TICKS: u32 = 30;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldEffects {
    /// Ticks of shake remaining.  Zero means inactive.
    pub shake: u32,
}

impl WorldEffects {
    pub fn is_shaking(&self) -> bool {
        self.shake > 0
    }

    /// Restart the shake countdown.
    pub fn trigger_shake(&mut self) {
        self.shake = SHAKE_DURATION_TICKS;
    }

    /// One tick of decay.
    pub fn decay(&mut self) {
        self.shake = self.shake.saturating_sub(1);
    }
}
