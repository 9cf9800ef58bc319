//! Session event channel
//!
//! The controller publishes [`SessionEvent`]s with `try_send` so it never
//! waits on a consumer. Firmware hosts typically declare a static channel
//! with `CriticalSectionRawMutex`; single-threaded hosts can own a
//! `NoopRawMutex` channel.

use embassy_sync::channel::{Channel, Sender};
use repcount_core::RepEvent;

/// Channel capacity for session events
pub const EVENT_CHANNEL_SIZE: usize = 8;

/// Channel carrying session events to display, audio, or logging tasks
pub type SessionChannel<M> = Channel<M, SessionEvent, EVENT_CHANNEL_SIZE>;

/// Sending half held by the session controller
pub type SessionSender<'ch, M> = Sender<'ch, M, SessionEvent, EVENT_CHANNEL_SIZE>;

/// Session lifecycle and counting events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Sensor feed subscribed, counting active
    Started,
    /// A repetition completed
    Rep(RepEvent),
    /// The target count was reached; a `Stopped` follows
    TargetReached {
        /// Count at the moment the target was hit
        count: u32,
    },
    /// Count set back to zero
    Reset,
    /// Sensor feed released, counting inactive
    Stopped,
}
