//! Screen wake lock trait

/// Keeps the display (dimly) lit while a session is counting
///
/// Implementations must tolerate `release` without a prior `acquire`.
pub trait WakeLock {
    /// Take the lock
    fn acquire(&mut self);

    /// Give the lock back
    fn release(&mut self);

    /// Check if the lock is currently held
    fn is_held(&self) -> bool;
}
