//! Business-hours time model.
//!
//! # Design
//!
//! Time is a `{day, hour, minute}` triple rather than a monotonic counter:
//! every scheduling rule in the calendar (work hours, breaks, room capacity)
//! is phrased in terms of a clock hour within a business day, so keeping the
//! components explicit makes all schedule arithmetic exact integer math and
//! gives a free lexicographic total order.
//!
//! The day-end rollover is deliberately lossy: once an advance reaches the
//! configured closing hour the clock lands exactly on the next day's opening
//! instant and any overshoot minutes are discarded.  Nothing in the calendar
//! can happen outside business hours, so carrying the overshoot would only
//! smear the opening instant.
//!
//! Real-time pacing lives in [`Pacer`]: elapsed wall milliseconds at an
//! integer speed become whole simulated minutes, with the fractional
//! remainder carried across calls so no minute is ever lost to truncation.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A simulated calendar instant.
///
/// Ordering is lexicographic by (day, hour, minute) — exactly the derive
/// order of the fields.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime {
    /// Calendar day, starting at 1.
    pub day: u32,
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Minute of hour, 0–59.
    pub minute: u8,
}

impl SimTime {
    /// Construct with validation: `day ≥ 1`, `hour < 24`, `minute < 60`.
    pub fn new(day: u32, hour: u8, minute: u8) -> CoreResult<Self> {
        if day == 0 {
            return Err(CoreError::InvalidTime("day must be >= 1".into()));
        }
        if hour >= 24 {
            return Err(CoreError::InvalidTime(format!("hour {hour} out of range")));
        }
        if minute >= 60 {
            return Err(CoreError::InvalidTime(format!("minute {minute} out of range")));
        }
        Ok(Self { day, hour, minute })
    }

    /// The top of this time's hour (minute 0).
    #[inline]
    pub fn top_of_hour(self) -> SimTime {
        SimTime { minute: 0, ..self }
    }

    /// `true` if this instant lies on `(day, hour)` exactly at minute 0.
    #[inline]
    pub fn is_start_of(self, day: u32, hour: u8) -> bool {
        self.day == day && self.hour == hour && self.minute == 0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

// ── Advance ───────────────────────────────────────────────────────────────────

/// Result of one clock movement: the new time plus boundary flags.
///
/// The flags drive collaborator notifications; for a single movement they are
/// consumed in the fixed order day-ended, day-started, hour-changed,
/// minute-changed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advance {
    /// The clock position after the movement.
    pub time: SimTime,
    /// Time moved at all (false only for no-op advances).
    pub minute_changed: bool,
    /// The hour component differs from before (or the day rolled).
    pub hour_changed: bool,
    /// A business day ended during this movement.
    pub day_ended: bool,
    /// A business day started during this movement.  Set together with
    /// `day_ended` on rollover.
    pub day_started: bool,
}

impl Advance {
    /// A no-op result: `time` unchanged, every flag false.
    pub fn unchanged(time: SimTime) -> Self {
        Self {
            time,
            minute_changed: false,
            hour_changed: false,
            day_ended: false,
            day_started: false,
        }
    }
}

// ── BusinessDay ───────────────────────────────────────────────────────────────

/// The configured daily operating window, and all clock math against it.
///
/// Cheap to copy; holds no state — advancing is pure `(time, minutes) → time`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusinessDay {
    /// First operating hour of each day (inclusive).
    pub open_hour: u8,
    /// Hour at which the day ends (exclusive).  Reaching it rolls the clock
    /// to the next day's `open_hour`.
    pub close_hour: u8,
}

impl Default for BusinessDay {
    fn default() -> Self {
        Self { open_hour: 8, close_hour: 17 }
    }
}

impl BusinessDay {
    /// Construct with validation: `open < close ≤ 24`.
    pub fn new(open_hour: u8, close_hour: u8) -> CoreResult<Self> {
        if open_hour >= close_hour || close_hour > 24 {
            return Err(CoreError::InvalidBusinessDay(format!(
                "open {open_hour} / close {close_hour}: need open < close <= 24"
            )));
        }
        Ok(Self { open_hour, close_hour })
    }

    /// The opening instant of `day`.
    #[inline]
    pub fn opening(&self, day: u32) -> SimTime {
        SimTime { day, hour: self.open_hour, minute: 0 }
    }

    /// Advance `t` by `minutes` whole simulated minutes.
    ///
    /// `minutes == 0` is a no-op: the input time is returned with all flags
    /// false.  When the advance reaches `close_hour` the clock lands on the
    /// next day's opening instant and both day flags are set; overshoot past
    /// the boundary is discarded (see module docs).
    pub fn advance(&self, t: SimTime, minutes: u32) -> Advance {
        if minutes == 0 {
            return Advance::unchanged(t);
        }

        let within_day = t.hour as u32 * 60 + t.minute as u32 + minutes;
        if within_day >= self.close_hour as u32 * 60 {
            let time = self.opening(t.day + 1);
            return Advance {
                time,
                minute_changed: true,
                hour_changed: true,
                day_ended: true,
                day_started: true,
            };
        }

        let time = SimTime {
            day:    t.day,
            hour:   (within_day / 60) as u8,
            minute: (within_day % 60) as u8,
        };
        Advance {
            time,
            minute_changed: true,
            hour_changed: time.hour != t.hour,
            day_ended: false,
            day_started: false,
        }
    }

    /// Jump the clock directly to `target`.
    ///
    /// Returns `None` when `target` is not strictly after `t` (a no-op, not
    /// an error).  The jump is atomic: flags reflect only how the endpoint
    /// differs from the start — boundary events for intermediate days and
    /// hours are **not** individually reported.
    pub fn skip_to(&self, t: SimTime, target: SimTime) -> Option<Advance> {
        if target <= t {
            return None;
        }
        let day_crossed = target.day != t.day;
        Some(Advance {
            time: target,
            minute_changed: true,
            hour_changed: day_crossed || target.hour != t.hour,
            day_ended: day_crossed,
            day_started: day_crossed,
        })
    }
}

// ── Pacer ─────────────────────────────────────────────────────────────────────

/// Converts elapsed real time into whole simulated minutes.
///
/// `speed` is simulated minutes per real second; 0 means frozen.  The
/// fractional remainder of each conversion is carried into the next call, so
/// a long run of small deltas yields exactly as many minutes as one big
/// delta would have (within one minute, with the carry always in `[0, 1)`).
#[derive(Clone, Debug, Default)]
pub struct Pacer {
    carry: f64,
}

impl Pacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole simulated minutes covered by `elapsed_ms` at `speed`.
    ///
    /// Speed 0 always yields 0 and leaves the carry untouched.
    pub fn whole_minutes(&mut self, elapsed_ms: u64, speed: u32) -> u64 {
        if speed == 0 {
            return 0;
        }
        let total = self.carry + elapsed_ms as f64 / 1000.0 * speed as f64;
        let minutes = total.floor();
        self.carry = total - minutes;
        minutes as u64
    }

    /// Current fractional remainder, always in `[0, 1)`.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Drop any accumulated fraction (used when the clock jumps).
    pub fn reset(&mut self) {
        self.carry = 0.0;
    }
}
