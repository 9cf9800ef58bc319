//! Count feedback trait (display and speech)

use core::fmt;

/// Errors that can occur when speaking a count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackError {
    /// Speech engine not initialized or language unavailable
    SpeechUnavailable,
    /// Speech engine rejected the utterance
    Busy,
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackError::SpeechUnavailable => f.write_str("speech output unavailable"),
            FeedbackError::Busy => f.write_str("speech output busy"),
        }
    }
}

/// Trait for presenting the repetition count to the user
pub trait RepFeedback {
    /// Replace the displayed count
    ///
    /// `text` is the decimal count, e.g. "12".
    fn show_count(&mut self, text: &str);

    /// Speak the count aloud, replacing anything still queued
    fn announce(&mut self, text: &str) -> Result<(), FeedbackError>;
}
