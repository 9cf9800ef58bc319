//! Push-up state machine definition
//!
//! A repetition is one full cycle through the four states. Direction
//! changes only register after a stop at each extreme, so oscillation
//! mid-motion is never read as extra repetitions.

use super::events::Transition;

/// Position of the body within one repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushupState {
    /// Pushing back up
    MovingUp,
    /// Lowering toward the floor
    MovingDown,
    /// Paused at the bottom
    StoppedBottom,
    /// Resting at the top (initial state)
    #[default]
    StoppedTop,
}

impl PushupState {
    /// Process a transition symbol and return the next state
    ///
    /// Returns `None` when the pair is not in the transition table; the
    /// caller keeps its current state in that case.
    pub fn transition(self, symbol: Transition) -> Option<Self> {
        use PushupState::*;
        use Transition::*;

        match (self, symbol) {
            (StoppedTop, Down) => Some(MovingDown),
            (MovingDown, Stopped) => Some(StoppedBottom),
            (StoppedBottom, Up) => Some(MovingUp),
            (MovingUp, Stopped) => Some(StoppedTop),

            // Everything else, including a reversal without a pause
            _ => None,
        }
    }

    /// Check if moving from `self` to `next` completes a repetition
    pub fn completes_rep(self, next: PushupState) -> bool {
        self == PushupState::MovingUp && next == PushupState::StoppedTop
    }
}
