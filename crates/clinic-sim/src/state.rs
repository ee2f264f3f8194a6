//! Shared simulation state snapshot.

use clinic_core::{Session, SessionId, SessionStatus, SimTime};

/// The mutable simulation state one [`SimLoop`][crate::SimLoop] drives.
///
/// Owned by the host; the loop borrows it mutably for the duration of one
/// tick.  All session mutation flows through the loop or an explicit
/// booking operation — there is no parallelism, only ordering.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimState {
    /// Current simulated instant.
    pub time: SimTime,
    /// Simulated minutes per real second.  0 freezes the clock.
    pub speed: u32,
    pub paused: bool,
    /// The session collection — the single source of truth for the calendar.
    pub sessions: Vec<Session>,
}

impl SimState {
    pub fn new(time: SimTime, speed: u32) -> Self {
        Self { time, speed, paused: false, sessions: Vec::new() }
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// `true` while any session is actively running.
    pub fn any_in_progress(&self) -> bool {
        self.sessions
            .iter()
            .any(|s| s.status == SessionStatus::InProgress)
    }

    /// The earliest `Scheduled` session starting strictly after `t`.
    /// Ties broken by `SessionId` for determinism.
    pub fn next_session_after(&self, t: SimTime) -> Option<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Scheduled && s.start_instant() > t)
            .min_by_key(|s| (s.start_instant(), s.id))
    }

    /// A `Scheduled` session due to start exactly at `t`, if any.
    pub fn session_pending_at(&self, t: SimTime) -> Option<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Scheduled && s.start_instant() == t)
            .min_by_key(|s| s.id)
    }
}
