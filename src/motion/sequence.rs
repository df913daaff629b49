//! Half-step switching sequence for 4-phase unipolar motors.

/// On/off state of the four coil lines for one phase.
///
/// Element `k` drives output line `k`.
pub type PhasePattern = [bool; 4];

/// Cyclic table of eight phase patterns.
///
/// Walking the table forward turns the motor one way; [`reverse`] yields the
/// table for the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequence {
    phases: [PhasePattern; 8],
}

impl StepSequence {
    /// Half-step sequence for the 28BYJ48 (clockwise).
    pub const HALF_STEP_28BYJ48: Self = Self::new([
        [true, false, false, false],
        [true, true, false, false],
        [false, true, false, false],
        [false, true, true, false],
        [false, false, true, false],
        [false, false, true, true],
        [false, false, false, true],
        [true, false, false, true],
    ]);

    /// Number of phases in the table.
    pub const LEN: usize = 8;

    /// Create a sequence from raw phase patterns.
    pub const fn new(phases: [PhasePattern; 8]) -> Self {
        Self { phases }
    }

    /// Phase pattern for step `index`, wrapping around the table.
    #[inline]
    pub fn phase(&self, index: usize) -> PhasePattern {
        self.phases[index % Self::LEN]
    }

    /// Sequence for the opposite rotation.
    ///
    /// Row order is reversed and so is the line order inside each row, which
    /// mirrors every coil onto its counterpart.
    pub fn reversed(&self) -> Self {
        let mut phases = self.phases;
        phases.reverse();
        for phase in phases.iter_mut() {
            phase.reverse();
        }
        Self { phases }
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::HALF_STEP_28BYJ48
    }
}

/// Sequence to use for counter-clockwise rotation.
#[inline]
pub fn reverse(sequence: &StepSequence) -> StepSequence {
    sequence.reversed()
}
