//! Session model and lifecycle.
//!
//! A session is created `Scheduled`, becomes `InProgress` exactly when the
//! clock reaches its start instant, and completes when its progress reaches
//! 1.0.  Completed and cancelled sessions are immutable with respect to
//! scheduling — they never occupy a calendar slot again.

use crate::{CoreError, CoreResult, CustomerId, SessionId, SimTime, WorkerId};

// ── SessionLength ─────────────────────────────────────────────────────────────

/// The three offered session durations.
///
/// Durations are fixed by the service menu; anything else is rejected at
/// construction via [`SessionLength::from_minutes`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionLength {
    /// 50 minutes — fits inside one calendar hour.
    Standard,
    /// 80 minutes — spans two calendar hours.
    Extended,
    /// 180 minutes — spans three calendar hours.
    Intensive,
}

impl SessionLength {
    /// Parse a raw minute count, rejecting anything but 50, 80, or 180.
    pub fn from_minutes(minutes: u32) -> CoreResult<Self> {
        match minutes {
            50 => Ok(SessionLength::Standard),
            80 => Ok(SessionLength::Extended),
            180 => Ok(SessionLength::Intensive),
            other => Err(CoreError::InvalidDuration(other)),
        }
    }

    /// Duration in minutes.
    #[inline]
    pub fn minutes(self) -> u32 {
        match self {
            SessionLength::Standard => 50,
            SessionLength::Extended => 80,
            SessionLength::Intensive => 180,
        }
    }

    /// Number of calendar hours the session touches.  A partially used hour
    /// counts as fully occupied.
    #[inline]
    pub fn span_len(self) -> u8 {
        self.minutes().div_ceil(60) as u8
    }
}

// ── SessionStatus ─────────────────────────────────────────────────────────────

/// Lifecycle state of a session.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    /// Marked by an external collaborator when the booking was invalidated
    /// after the fact (e.g. a schedule change landed on top of it).  Treated
    /// like `Cancelled` for calendar purposes.
    Conflict,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One booked appointment between a worker and a customer.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub id: SessionId,
    pub worker: WorkerId,
    pub customer: CustomerId,
    /// Scheduled start day.
    pub day: u32,
    /// Scheduled start hour (sessions always start at minute 0).
    pub hour: u8,
    pub length: SessionLength,
    pub is_virtual: bool,
    pub status: SessionStatus,
    /// Fraction complete, 0.0–1.0.  Advanced by the simulation loop.
    pub progress: f32,
    /// Stamped when the session completes.
    pub completed_at: Option<SimTime>,
}

impl Session {
    /// Create a freshly scheduled session.
    pub fn new(
        id: SessionId,
        worker: WorkerId,
        customer: CustomerId,
        day: u32,
        hour: u8,
        length: SessionLength,
        is_virtual: bool,
    ) -> Self {
        Self {
            id,
            worker,
            customer,
            day,
            hour,
            length,
            is_virtual,
            status: SessionStatus::Scheduled,
            progress: 0.0,
            completed_at: None,
        }
    }

    /// The instant at which this session is due to start.
    #[inline]
    pub fn start_instant(&self) -> SimTime {
        SimTime { day: self.day, hour: self.hour, minute: 0 }
    }

    /// `true` while the session still occupies calendar slots.
    #[inline]
    pub fn occupies_calendar(&self) -> bool {
        matches!(self.status, SessionStatus::Scheduled | SessionStatus::InProgress)
    }

    /// Transition `Scheduled → InProgress`.  Any other starting state is
    /// left untouched (returns whether the transition happened).
    pub fn begin(&mut self) -> bool {
        if self.status == SessionStatus::Scheduled {
            self.status = SessionStatus::InProgress;
            true
        } else {
            false
        }
    }

    /// Cancel the session.  Allowed from any pre-completion state; a
    /// completed or already-cancelled session is left untouched.
    pub fn cancel(&mut self) -> bool {
        match self.status {
            SessionStatus::Scheduled | SessionStatus::InProgress | SessionStatus::Conflict => {
                self.status = SessionStatus::Cancelled;
                true
            }
            SessionStatus::Completed | SessionStatus::Cancelled => false,
        }
    }

    /// Advance progress by `minutes` of elapsed simulated time.
    ///
    /// Only meaningful while `InProgress`.  Progress clamps at 1.0; reaching
    /// it completes the session and stamps `completed_at = now`.  Returns
    /// `true` on the call that completes the session.
    pub fn advance_progress(&mut self, minutes: u32, now: SimTime) -> bool {
        if self.status != SessionStatus::InProgress {
            return false;
        }
        self.progress = (self.progress + minutes as f32 / self.length.minutes() as f32).min(1.0);
        if self.progress >= 1.0 {
            self.status = SessionStatus::Completed;
            self.completed_at = Some(now);
            true
        } else {
            false
        }
    }
}
