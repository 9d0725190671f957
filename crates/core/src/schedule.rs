//! Frame scheduling policy for hosts.
//!
//! Hosts prefer the platform's native animation-frame callback. When none is
//! available they fall back to a fixed ~2 Hz timer; the fallback is silent.

/// Interval of the timer fallback, in milliseconds.
pub const FALLBACK_INTERVAL_MS: i32 = 500;

/// How the next frame gets scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameScheduler {
    /// The host's native animation-frame callback.
    AnimationFrame,
    /// A fixed-interval timer.
    Timer { interval_ms: i32 },
}

impl FrameScheduler {
    /// Picks the native animation frame when the host has one.
    pub fn detect(has_animation_frame: bool) -> Self {
        if has_animation_frame {
            FrameScheduler::AnimationFrame
        } else {
            log::debug!("no animation frame callback, falling back to {FALLBACK_INTERVAL_MS} ms timer");
            FrameScheduler::Timer {
                interval_ms: FALLBACK_INTERVAL_MS,
            }
        }
    }
}
