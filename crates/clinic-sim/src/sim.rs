//! The `SimLoop` struct and its cooperative tick.
//!
//! # Shape of the loop
//!
//! The host owns a repeated callback (frame or timer driven) and calls
//! [`SimLoop::pump`] from it with the current wall-clock milliseconds.  The
//! loop is an explicitly constructed object with no global state: tests
//! build fresh instances instead of resetting shared singletons, and each
//! tick is a transformation of `(state, elapsed)` applied through one
//! `&mut SimState` borrow.
//!
//! One pump either:
//!
//! - returns [`Pump::NotRunning`] (loop stopped),
//! - throttles (elapsed real time below the tick threshold; bounds tick
//!   frequency independent of host frame rate, consuming nothing),
//! - idles (paused, speed 0, or not enough elapsed time for a whole
//!   simulated minute; the fraction stays in the pacer), or
//! - advances: moves the clock, fires boundary notifications in fixed
//!   order, ticks every in-progress session, then starts every scheduled
//!   session whose start instant was crossed.
//!
//! Hook faults are logged and swallowed at the tick boundary; a failing
//! collaborator can never stall or desynchronize the clock.

use clinic_core::{Advance, BusinessDay, Pacer, SessionId, SessionStatus, SimTime};

use crate::hooks::{HookResult, SimHooks};
use crate::state::SimState;

/// Default minimum real milliseconds between ticks.
pub const DEFAULT_TICK_THRESHOLD_MS: u64 = 250;

// ── Outcome types ─────────────────────────────────────────────────────────────

/// What one [`SimLoop::pump`] call did.
#[derive(Clone, Debug)]
pub enum Pump {
    /// The loop is stopped; nothing was examined.
    NotRunning,
    /// Below the tick threshold (or the first pump after start); no state
    /// was consumed.
    Throttled,
    /// Elapsed time was consumed but the clock did not move (paused,
    /// speed 0, or the fraction has not yet reached a whole minute).
    Idle,
    /// The clock moved.
    Advanced(Ticked),
}

/// Details of one advancing tick.
#[derive(Clone, Debug)]
pub struct Ticked {
    /// Whole simulated minutes the clock actually moved.  Less than the
    /// pacer produced when a day-end rollover discarded overshoot; 0 for
    /// skip jumps.
    pub minutes: u32,
    pub advance: Advance,
    /// Sessions that transitioned `Scheduled → InProgress` this tick.
    pub started: Vec<SessionId>,
    /// Sessions that reached full progress this tick.
    pub completed: Vec<SessionId>,
}

// ── SimLoop ───────────────────────────────────────────────────────────────────

/// The cooperative, single-threaded simulation loop.
///
/// Exactly one loop drives one clock; no two ticks ever execute
/// concurrently, so the state needs no locking, only ordering.
pub struct SimLoop {
    business: BusinessDay,
    pacer: Pacer,
    tick_threshold_ms: u64,
    /// Wall-clock ms of the last consumed pump.  `None` right after
    /// `start()`; a stale gap is never converted into simulated time.
    last_real_ms: Option<u64>,
    running: bool,
}

impl SimLoop {
    pub fn new(business: BusinessDay) -> Self {
        Self {
            business,
            pacer: Pacer::new(),
            tick_threshold_ms: DEFAULT_TICK_THRESHOLD_MS,
            last_real_ms: None,
            running: false,
        }
    }

    /// Override the minimum real milliseconds between ticks.
    pub fn with_tick_threshold(mut self, ms: u64) -> Self {
        self.tick_threshold_ms = ms;
        self
    }

    #[inline]
    pub fn business(&self) -> BusinessDay {
        self.business
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin consuming pumps.  The first pump after `start` only primes the
    /// wall-clock reference.
    pub fn start(&mut self) {
        self.running = true;
        self.last_real_ms = None;
    }

    /// Cease advancing.  Ticks are synchronous, so there is never an
    /// in-flight tick to interrupt.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── The tick ──────────────────────────────────────────────────────────

    /// One cooperative scheduling opportunity.
    pub fn pump<H: SimHooks>(&mut self, now_ms: u64, state: &mut SimState, hooks: &mut H) -> Pump {
        if !self.running {
            return Pump::NotRunning;
        }
        let Some(last) = self.last_real_ms else {
            self.last_real_ms = Some(now_ms);
            return Pump::Throttled;
        };

        let elapsed = now_ms.saturating_sub(last);
        if elapsed < self.tick_threshold_ms {
            // Too soon: leave the reference untouched so the elapsed time
            // is counted once the threshold is met.
            return Pump::Throttled;
        }
        self.last_real_ms = Some(now_ms);

        if state.paused || state.speed == 0 {
            return Pump::Idle;
        }
        let minutes = self.pacer.whole_minutes(elapsed, state.speed);
        if minutes == 0 {
            return Pump::Idle;
        }
        let minutes = u32::try_from(minutes).unwrap_or(u32::MAX);

        let prev = state.time;
        let advance = self.business.advance(prev, minutes);
        Pump::Advanced(self.apply(advance, minutes, prev, state, hooks))
    }

    // ── Skips ─────────────────────────────────────────────────────────────

    /// Jump the clock directly to `target`.
    ///
    /// Returns `false` (a deterministic no-op) when `target` is not strictly
    /// in the future.  The jump is atomic: boundary notifications reflect
    /// only the endpoint comparison, in-progress sessions receive no tick,
    /// and start notifications fire for sessions whose start instant was
    /// crossed.  Any fractional pacer carry is dropped.
    pub fn skip_to<H: SimHooks>(
        &mut self,
        target: SimTime,
        state: &mut SimState,
        hooks: &mut H,
    ) -> bool {
        let prev = state.time;
        let Some(advance) = self.business.skip_to(prev, target) else {
            return false;
        };
        self.pacer.reset();
        self.apply(advance, 0, prev, state, hooks);
        true
    }

    /// Jump to the next scheduled session.
    ///
    /// Refuses (returns `false`) while any session is in progress.  A
    /// session scheduled at the *current* instant is started in place
    /// instead of moving time.  When the next session is not on the current
    /// day the jump is capped at the next day's opening instant.  Near a
    /// day boundary both caps can apply and the earlier instant wins, so
    /// the skip never overshoots a day boundary or the next session.
    pub fn skip_to_next_session<H: SimHooks>(
        &mut self,
        state: &mut SimState,
        hooks: &mut H,
    ) -> bool {
        if state.any_in_progress() {
            log::debug!("skip refused: a session is in progress");
            return false;
        }

        if let Some(pending) = state.session_pending_at(state.time) {
            let id = pending.id;
            if let Some(s) = state.session_mut(id)
                && s.begin()
            {
                guard("on_session_started", hooks.on_session_started(id));
            }
            return true;
        }

        let Some(next) = state.next_session_after(state.time) else {
            return false;
        };
        let target = next
            .start_instant()
            .min(self.business.opening(state.time.day + 1));
        self.skip_to(target, state, hooks)
    }

    /// The start instant of the next pending session (including one due
    /// exactly now), or `None` when nothing is scheduled ahead.
    pub fn next_session_time(&self, state: &SimState) -> Option<SimTime> {
        state
            .session_pending_at(state.time)
            .or_else(|| state.next_session_after(state.time))
            .map(|s| s.start_instant())
    }

    // ── Applying an advance ───────────────────────────────────────────────

    /// Write the new time and fire all notifications for one movement.
    ///
    /// Fixed ordering per movement: day-ended, day-started, hour-changed,
    /// minute-changed, full advance result; then session ticks for every
    /// in-progress session; then start notifications for newly crossed
    /// slots.
    fn apply<H: SimHooks>(
        &mut self,
        advance: Advance,
        minutes: u32,
        prev: SimTime,
        state: &mut SimState,
        hooks: &mut H,
    ) -> Ticked {
        // A rollover lands at the next opening and discards overshoot;
        // sessions absorb only the minutes the clock actually moved.
        let minutes = if advance.day_ended && minutes > 0 {
            let close = self.business.close_hour as u32 * 60;
            close
                .saturating_sub(prev.hour as u32 * 60 + prev.minute as u32)
                .min(minutes)
        } else {
            minutes
        };

        state.time = advance.time;

        if advance.day_ended {
            guard("on_day_ended", hooks.on_day_ended(prev.day));
        }
        if advance.day_started {
            guard("on_day_started", hooks.on_day_started(advance.time.day));
        }
        if advance.hour_changed {
            guard("on_hour_changed", hooks.on_hour_changed(advance.time));
        }
        if advance.minute_changed {
            guard("on_minute_changed", hooks.on_minute_changed(advance.time));
        }
        guard("on_time_advanced", hooks.on_time_advanced(&advance));

        let mut completed = Vec::new();
        if minutes > 0 {
            for s in state
                .sessions
                .iter_mut()
                .filter(|s| s.status == SessionStatus::InProgress)
            {
                if s.advance_progress(minutes, advance.time) {
                    completed.push(s.id);
                }
                guard("on_session_tick", hooks.on_session_tick(s.id, minutes));
            }
        }

        let mut started = Vec::new();
        for s in state
            .sessions
            .iter_mut()
            .filter(|s| s.status == SessionStatus::Scheduled)
        {
            let at = s.start_instant();
            if at > prev && at <= advance.time && s.begin() {
                started.push(s.id);
                guard("on_session_started", hooks.on_session_started(s.id));
            }
        }

        Ticked { minutes, advance, started, completed }
    }
}

// ── Fault isolation ───────────────────────────────────────────────────────────

/// Log and swallow a hook fault.  The loop must keep rescheduling no matter
/// what a collaborator does.
fn guard(what: &str, result: HookResult) {
    if let Err(fault) = result {
        log::warn!("{what}: collaborator fault ignored: {fault}");
    }
}
