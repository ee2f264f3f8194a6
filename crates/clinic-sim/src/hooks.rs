//! Collaborator hooks invoked by the tick loop.
//!
//! All methods default to `Ok(())` so implementors only override what they
//! care about.  A returned [`HookFault`] is logged at the loop boundary and
//! never halts or desynchronizes the clock: the loop is fault-isolated per
//! tick.

use thiserror::Error;

use clinic_core::{Advance, SessionId, SimTime};

/// A failure reported by an external collaborator callback.
#[derive(Debug, Clone, Error)]
#[error("hook fault: {0}")]
pub struct HookFault(pub String);

pub type HookResult = Result<(), HookFault>;

/// Callbacks invoked by [`SimLoop`][crate::SimLoop] at key points in the
/// tick.
///
/// For a single advance the boundary notifications fire in a fixed order
/// (day-ended, day-started, hour-changed, minute-changed, then the full
/// advance result) before any session callbacks; session ticks for all
/// active sessions fire before start notifications for newly reached slots.
pub trait SimHooks {
    /// A business day ended.  `day` is the day that closed.
    fn on_day_ended(&mut self, _day: u32) -> HookResult {
        Ok(())
    }

    /// A business day started.  `day` is the day that opened.  Fires right
    /// after `on_day_ended` on rollover.
    fn on_day_started(&mut self, _day: u32) -> HookResult {
        Ok(())
    }

    /// The hour component changed (also set on day rollover).
    fn on_hour_changed(&mut self, _time: SimTime) -> HookResult {
        Ok(())
    }

    /// The clock moved at all this tick.
    fn on_minute_changed(&mut self, _time: SimTime) -> HookResult {
        Ok(())
    }

    /// The full advance result, after the individual boundary notifications.
    fn on_time_advanced(&mut self, _advance: &Advance) -> HookResult {
        Ok(())
    }

    /// An in-progress session absorbed `elapsed_minutes` of simulated time.
    /// Fired after the loop has already updated the session's progress.
    fn on_session_tick(&mut self, _id: SessionId, _elapsed_minutes: u32) -> HookResult {
        Ok(())
    }

    /// A session just transitioned `Scheduled → InProgress`.
    fn on_session_started(&mut self, _id: SessionId) -> HookResult {
        Ok(())
    }
}

/// A [`SimHooks`] that does nothing.  Use when driving the loop without
/// collaborator callbacks.
pub struct NoopHooks;

impl SimHooks for NoopHooks {}
