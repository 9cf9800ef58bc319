//! Session controller
//!
//! Owns the classifier and the running/stopped lifecycle:
//! - Subscribes to the sensor feed and holds the wake lock while running
//! - Routes samples to the classifier in arrival order
//! - Shows (and optionally speaks) each new count
//! - Stops the session once the target count is reached

use core::fmt::{self, Write};

use embassy_sync::blocking_mutex::raw::{NoopRawMutex, RawMutex};
use heapless::String;
use repcount_core::{MotionClassifier, PushupState, RepEvent};

use crate::channels::{SessionEvent, SessionSender};
use crate::config::{ConfigError, SessionConfig, MAX_TARGET};
use crate::traits::{RepFeedback, SensorError, SensorFeed, SensorSample, WakeLock};

/// Longest decimal rendering of a `u32`
pub const COUNT_TEXT_LEN: usize = 10;

/// Errors returned by session control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// The sensor feed could not be started
    Sensor(SensorError),
}

impl From<SensorError> for SessionError {
    fn from(err: SensorError) -> Self {
        SessionError::Sensor(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Sensor(err) => write!(f, "cannot start session: {}", err),
        }
    }
}

/// Render a count the way it is shown and spoken
pub fn format_count(count: u32) -> String<COUNT_TEXT_LEN> {
    let mut text = String::new();
    // A u32 never exceeds COUNT_TEXT_LEN digits
    let _ = write!(text, "{}", count);
    text
}

/// Counting session around a [`MotionClassifier`]
pub struct SessionController<'ch, F, W, D, M = NoopRawMutex>
where
    M: RawMutex,
{
    /// Repetition classifier
    classifier: MotionClassifier,
    /// Session settings
    config: SessionConfig,
    /// Whether samples are being counted
    running: bool,
    /// Sensor subsystem
    feed: F,
    /// Screen wake lock
    wake_lock: W,
    /// Count display and speech
    feedback: D,
    /// Optional event publisher
    events: Option<SessionSender<'ch, M>>,
}

impl<'ch, F, W, D> SessionController<'ch, F, W, D, NoopRawMutex>
where
    F: SensorFeed,
    W: WakeLock,
    D: RepFeedback,
{
    /// Create a session controller that does not publish events
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        config: SessionConfig,
        feed: F,
        wake_lock: W,
        feedback: D,
    ) -> Result<Self, ConfigError> {
        Self::build(config, feed, wake_lock, feedback, None)
    }
}

impl<'ch, F, W, D, M> SessionController<'ch, F, W, D, M>
where
    F: SensorFeed,
    W: WakeLock,
    D: RepFeedback,
    M: RawMutex,
{
    /// Create a session controller that publishes [`SessionEvent`]s
    ///
    /// Fails if `config` does not validate.
    pub fn with_events(
        config: SessionConfig,
        feed: F,
        wake_lock: W,
        feedback: D,
        events: SessionSender<'ch, M>,
    ) -> Result<Self, ConfigError> {
        Self::build(config, feed, wake_lock, feedback, Some(events))
    }

    fn build(
        config: SessionConfig,
        feed: F,
        wake_lock: W,
        feedback: D,
        events: Option<SessionSender<'ch, M>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: MotionClassifier::with_config(config.classifier),
            config,
            running: false,
            feed,
            wake_lock,
            feedback,
            events,
        })
    }

    /// Start counting
    ///
    /// Subscribes to the sensor feed, then takes the wake lock. If the
    /// subscription fails the session stays stopped. Starting a running
    /// session does nothing.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.running {
            return Ok(());
        }

        self.feed.subscribe(self.config.rate)?;
        self.wake_lock.acquire();
        self.running = true;

        info!(
            "Session started (target {}, rate {:?}, period {} us)",
            self.config.target,
            self.config.rate,
            self.config.rate.nominal_period_us()
        );
        self.publish(SessionEvent::Started);
        Ok(())
    }

    /// Stop counting
    ///
    /// Resets the count, releases the wake lock, and unsubscribes from the
    /// sensor feed. Stopping a stopped session does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.running = false;
        self.reset();
        self.wake_lock.release();
        self.feed.unsubscribe();

        info!("Session stopped");
        self.publish(SessionEvent::Stopped);
    }

    /// Start/stop button: stop if running, start otherwise
    pub fn toggle(&mut self) -> Result<(), SessionError> {
        if self.running {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Host is moving to the background; a running session is stopped
    pub fn suspend(&mut self) {
        if self.running {
            debug!("Suspending running session");
            self.stop();
        }
    }

    /// Set the count back to zero and show it
    pub fn reset(&mut self) {
        self.classifier.reset();
        self.feedback.show_count(&format_count(0));

        debug!("Count reset");
        self.publish(SessionEvent::Reset);
    }

    /// Deliver one sensor sample
    ///
    /// Samples arriving while stopped are dropped. Returns the
    /// [`RepEvent`] when this sample completes a repetition.
    pub fn on_sample(&mut self, sample: SensorSample) -> Option<RepEvent> {
        if !self.running {
            trace!("Sample dropped, session stopped");
            return None;
        }

        match sample {
            SensorSample::Gravity(gravity) => {
                self.classifier.on_gravity_sample(gravity);
                None
            }
            SensorSample::LinearAcceleration(accel) => {
                let prev = self.classifier.state();
                let event = self.classifier.on_acceleration_sample(accel);
                let state = self.classifier.state();

                if state != prev {
                    trace!(
                        "Projection {} -> {:?}",
                        self.classifier.last_projection(),
                        state
                    );
                }

                if let Some(rep) = event {
                    self.handle_rep(rep);
                }
                event
            }
        }
    }

    /// Show, announce, and publish a completed repetition, then apply the
    /// target policy
    fn handle_rep(&mut self, rep: RepEvent) {
        let text = format_count(rep.count);
        self.feedback.show_count(&text);

        if self.config.announce {
            if let Err(err) = self.feedback.announce(&text) {
                warn!("Announce failed: {:?}", err);
            }
        }

        info!("Rep {}", rep.count);
        self.publish(SessionEvent::Rep(rep));

        if rep.count >= self.config.target {
            info!("Target {} reached", self.config.target);
            self.publish(SessionEvent::TargetReached { count: rep.count });
            self.stop();
        }
    }

    fn publish(&self, event: SessionEvent) {
        if let Some(sender) = &self.events {
            if sender.try_send(event).is_err() {
                warn!("Session event dropped: {:?}", event);
            }
        }
    }

    /// Set the target count, clamped to `0..=MAX_TARGET`
    pub fn set_target(&mut self, target: u32) {
        self.config.target = target.min(MAX_TARGET);
    }

    /// Enable or disable speaking each count
    pub fn set_announce(&mut self, announce: bool) {
        self.config.announce = announce;
    }

    /// Check if the session is counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed repetitions since the last reset
    pub fn count(&self) -> u32 {
        self.classifier.count()
    }

    /// Current target count
    pub fn target(&self) -> u32 {
        self.config.target
    }

    /// Current classifier state
    pub fn state(&self) -> PushupState {
        self.classifier.state()
    }

    /// Current session settings
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Access the classifier
    pub fn classifier(&self) -> &MotionClassifier {
        &self.classifier
    }

    /// Access the sensor feed
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Access the wake lock
    pub fn wake_lock(&self) -> &W {
        &self.wake_lock
    }

    /// Access the count feedback
    pub fn feedback(&self) -> &D {
        &self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::SessionChannel;
    use crate::traits::{FeedbackError, SampleRate};
    use repcount_core::Vector3;
    use std::vec::Vec;

    const GRAVITY: Vector3 = Vector3::new(0.0, 9.81, 0.0);
    const DOWN: Vector3 = Vector3::new(0.0, 4.0, 0.0);
    const UP: Vector3 = Vector3::new(0.0, -4.0, 0.0);
    const STILL: Vector3 = Vector3::new(0.1, 0.3, -0.2);

    // Mock sensor feed for testing
    #[derive(Default)]
    struct MockFeed {
        subscribed: Option<SampleRate>,
        fail: Option<SensorError>,
        unsubscribe_calls: u32,
    }

    impl SensorFeed for MockFeed {
        fn subscribe(&mut self, rate: SampleRate) -> Result<(), SensorError> {
            if let Some(err) = self.fail {
                return Err(err);
            }
            self.subscribed = Some(rate);
            Ok(())
        }

        fn unsubscribe(&mut self) {
            self.subscribed = None;
            self.unsubscribe_calls += 1;
        }
    }

    // Mock wake lock for testing
    #[derive(Default)]
    struct MockWakeLock {
        held: bool,
        acquisitions: u32,
    }

    impl WakeLock for MockWakeLock {
        fn acquire(&mut self) {
            self.held = true;
            self.acquisitions += 1;
        }

        fn release(&mut self) {
            self.held = false;
        }

        fn is_held(&self) -> bool {
            self.held
        }
    }

    // Mock display and speech for testing
    #[derive(Default)]
    struct MockFeedback {
        shown: Vec<std::string::String>,
        spoken: Vec<std::string::String>,
        speech_error: Option<FeedbackError>,
    }

    impl RepFeedback for MockFeedback {
        fn show_count(&mut self, text: &str) {
            self.shown.push(text.into());
        }

        fn announce(&mut self, text: &str) -> Result<(), FeedbackError> {
            if let Some(err) = self.speech_error {
                return Err(err);
            }
            self.spoken.push(text.into());
            Ok(())
        }
    }

    type TestSession<'ch> = SessionController<'ch, MockFeed, MockWakeLock, MockFeedback>;

    fn session(config: SessionConfig) -> TestSession<'static> {
        SessionController::new(
            config,
            MockFeed::default(),
            MockWakeLock::default(),
            MockFeedback::default(),
        )
        .unwrap()
    }

    fn with_target(target: u32) -> SessionConfig {
        SessionConfig {
            target,
            ..SessionConfig::default()
        }
    }

    fn one_rep<M: RawMutex>(
        controller: &mut SessionController<'_, MockFeed, MockWakeLock, MockFeedback, M>,
    ) -> Option<RepEvent> {
        let mut last = None;
        for accel in [DOWN, STILL, UP, STILL] {
            last = controller.on_sample(SensorSample::LinearAcceleration(accel));
        }
        last
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0).as_str(), "0");
        assert_eq!(format_count(42).as_str(), "42");
        assert_eq!(format_count(u32::MAX).as_str(), "4294967295");
    }

    #[test]
    fn test_start_subscribes_and_locks() {
        let mut controller = session(SessionConfig::default());
        controller.start().unwrap();

        assert!(controller.is_running());
        assert_eq!(controller.feed().subscribed, Some(SampleRate::Game));
        assert!(controller.wake_lock().is_held());
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut controller = session(SessionConfig::default());
        controller.start().unwrap();
        controller.start().unwrap();
        assert_eq!(controller.wake_lock().acquisitions, 1);
    }

    #[test]
    fn test_failed_subscription_stays_stopped() {
        let feed = MockFeed {
            fail: Some(SensorError::GravityUnavailable),
            ..MockFeed::default()
        };
        let mut controller = SessionController::new(
            SessionConfig::default(),
            feed,
            MockWakeLock::default(),
            MockFeedback::default(),
        )
        .unwrap();

        assert_eq!(
            controller.start(),
            Err(SessionError::Sensor(SensorError::GravityUnavailable))
        );
        assert!(!controller.is_running());
        assert!(!controller.wake_lock().is_held());
    }

    #[test]
    fn test_samples_ignored_while_stopped() {
        let mut controller = session(SessionConfig::default());
        controller.on_sample(SensorSample::Gravity(GRAVITY));
        assert_eq!(controller.classifier().gravity(), Vector3::ZERO);

        assert_eq!(one_rep(&mut controller), None);
        assert_eq!(controller.count(), 0);
        assert_eq!(controller.state(), PushupState::StoppedTop);
    }

    #[test]
    fn test_counts_and_shows_reps() {
        let mut controller = session(SessionConfig::default());
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));

        assert_eq!(one_rep(&mut controller), Some(RepEvent::new(1)));
        assert_eq!(one_rep(&mut controller), Some(RepEvent::new(2)));

        assert_eq!(controller.count(), 2);
        assert_eq!(controller.feedback().shown, ["1", "2"]);
        assert!(controller.feedback().spoken.is_empty());
    }

    #[test]
    fn test_announce_when_enabled() {
        let mut controller = session(SessionConfig::default());
        controller.set_announce(true);
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));

        one_rep(&mut controller);
        assert_eq!(controller.feedback().spoken, ["1"]);
    }

    #[test]
    fn test_announce_failure_keeps_counting() {
        let feedback = MockFeedback {
            speech_error: Some(FeedbackError::SpeechUnavailable),
            ..MockFeedback::default()
        };
        let config = SessionConfig {
            announce: true,
            ..SessionConfig::default()
        };
        let mut controller = SessionController::new(
            config,
            MockFeed::default(),
            MockWakeLock::default(),
            feedback,
        )
        .unwrap();
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));

        assert_eq!(one_rep(&mut controller), Some(RepEvent::new(1)));
        assert!(controller.is_running());
        assert_eq!(controller.feedback().shown, ["1"]);
    }

    #[test]
    fn test_auto_stop_at_target() {
        let mut controller = session(with_target(2));
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));

        one_rep(&mut controller);
        assert!(controller.is_running());

        assert_eq!(one_rep(&mut controller), Some(RepEvent::new(2)));
        assert!(!controller.is_running());
        assert!(!controller.wake_lock().is_held());
        assert_eq!(controller.feed().subscribed, None);
        assert_eq!(controller.feed().unsubscribe_calls, 1);

        // Stopping resets the count
        assert_eq!(controller.count(), 0);
        assert_eq!(controller.feedback().shown, ["1", "2", "0"]);
    }

    #[test]
    fn test_zero_target_stops_on_first_rep() {
        let mut controller = session(with_target(0));
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));

        assert_eq!(one_rep(&mut controller), Some(RepEvent::new(1)));
        assert!(!controller.is_running());
    }

    #[test]
    fn test_out_of_range_target_rejected() {
        let result = SessionController::new(
            with_target(MAX_TARGET + 1),
            MockFeed::default(),
            MockWakeLock::default(),
            MockFeedback::default(),
        );
        assert_eq!(result.err(), Some(ConfigError::TargetOutOfRange));
    }

    #[test]
    fn test_nan_noise_threshold_rejected() {
        let mut config = SessionConfig::default();
        config.classifier.noise_threshold = f32::NAN;

        let result = SessionController::new(
            config,
            MockFeed::default(),
            MockWakeLock::default(),
            MockFeedback::default(),
        );
        assert_eq!(result.err(), Some(ConfigError::InvalidNoiseThreshold));
    }

    #[test]
    fn test_set_target_clamped() {
        let mut controller = session(with_target(MAX_TARGET));
        assert_eq!(controller.target(), MAX_TARGET);

        controller.set_target(250);
        assert_eq!(controller.target(), MAX_TARGET);

        controller.set_target(15);
        assert_eq!(controller.target(), 15);
    }

    #[test]
    fn test_reset_shows_zero() {
        let mut controller = session(SessionConfig::default());
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));
        one_rep(&mut controller);

        controller.reset();
        assert_eq!(controller.count(), 0);
        assert!(controller.is_running());
        assert_eq!(controller.feedback().shown, ["1", "0"]);
    }

    #[test]
    fn test_toggle() {
        let mut controller = session(SessionConfig::default());
        controller.toggle().unwrap();
        assert!(controller.is_running());

        controller.toggle().unwrap();
        assert!(!controller.is_running());
        assert!(!controller.wake_lock().is_held());
    }

    #[test]
    fn test_suspend_stops_running_session() {
        let mut controller = session(SessionConfig::default());
        controller.suspend();
        assert_eq!(controller.feed().unsubscribe_calls, 0);

        controller.start().unwrap();
        controller.suspend();
        assert!(!controller.is_running());
        assert_eq!(controller.feed().unsubscribe_calls, 1);
    }

    #[test]
    fn test_gravity_kept_across_restart() {
        let mut controller = session(SessionConfig::default());
        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));
        controller.stop();

        controller.start().unwrap();
        assert_eq!(controller.classifier().gravity(), GRAVITY);
    }

    #[test]
    fn test_events_published() {
        let channel = SessionChannel::<NoopRawMutex>::new();
        let mut controller = SessionController::with_events(
            with_target(1),
            MockFeed::default(),
            MockWakeLock::default(),
            MockFeedback::default(),
            channel.sender(),
        )
        .unwrap();

        controller.start().unwrap();
        controller.on_sample(SensorSample::Gravity(GRAVITY));
        one_rep(&mut controller);

        let mut events = Vec::new();
        while let Ok(event) = channel.try_receive() {
            events.push(event);
        }

        assert_eq!(
            events,
            [
                SessionEvent::Started,
                SessionEvent::Rep(RepEvent::new(1)),
                SessionEvent::TargetReached { count: 1 },
                SessionEvent::Reset,
                SessionEvent::Stopped,
            ]
        );
    }

    #[test]
    fn test_full_channel_drops_events() {
        let channel = SessionChannel::<NoopRawMutex>::new();
        let mut controller = SessionController::with_events(
            SessionConfig::default(),
            MockFeed::default(),
            MockWakeLock::default(),
            MockFeedback::default(),
            channel.sender(),
        )
        .unwrap();

        // Nobody is receiving; publishing must not block or fail the session
        for _ in 0..20 {
            controller.reset();
        }
        assert_eq!(controller.feedback().shown.len(), 20);
    }
}
