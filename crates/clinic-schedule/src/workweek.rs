//! Per-worker daily work schedule with validated break windows.

use crate::{ScheduleError, ScheduleResult};

/// A worker must have at least this many non-break working hours per day.
pub const MIN_WORKING_HOURS: u8 = 3;

/// Maximum break hours per day.
pub const MAX_BREAKS: usize = 3;

/// One worker's daily operating window.
///
/// Fields are private: every mutation goes through [`WorkSchedule::update`],
/// which re-runs full validation.  Invariants held at all times:
///
/// - `start_hour < end_hour ≤ 24`
/// - at most [`MAX_BREAKS`] break hours, unique, each in `[start, end)`
/// - `end - start - breaks ≥ MIN_WORKING_HOURS`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkSchedule {
    start_hour: u8,
    end_hour: u8,
    /// Sorted, unique.
    breaks: Vec<u8>,
}

impl WorkSchedule {
    /// Construct a validated schedule.  `breaks` need not be sorted.
    pub fn new(start_hour: u8, end_hour: u8, breaks: Vec<u8>) -> ScheduleResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ScheduleError::InvalidWorkweek(format!(
                "start {start_hour} / end {end_hour}: need start < end <= 24"
            )));
        }
        if breaks.len() > MAX_BREAKS {
            return Err(ScheduleError::InvalidWorkweek(format!(
                "{} break hours: at most {MAX_BREAKS} allowed",
                breaks.len()
            )));
        }
        let mut breaks = breaks;
        breaks.sort_unstable();
        if breaks.windows(2).any(|w| w[0] == w[1]) {
            return Err(ScheduleError::InvalidWorkweek("duplicate break hour".into()));
        }
        if let Some(&h) = breaks.iter().find(|&&h| h < start_hour || h >= end_hour) {
            return Err(ScheduleError::InvalidWorkweek(format!(
                "break hour {h} outside work hours {start_hour}..{end_hour}"
            )));
        }
        let working = end_hour - start_hour - breaks.len() as u8;
        if working < MIN_WORKING_HOURS {
            return Err(ScheduleError::InvalidWorkweek(format!(
                "only {working} working hours left: need at least {MIN_WORKING_HOURS}"
            )));
        }
        Ok(Self { start_hour, end_hour, breaks })
    }

    /// Replace the schedule wholesale.  The current schedule is untouched
    /// when the replacement fails validation.
    pub fn update(&mut self, start_hour: u8, end_hour: u8, breaks: Vec<u8>) -> ScheduleResult<()> {
        *self = Self::new(start_hour, end_hour, breaks)?;
        Ok(())
    }

    #[inline]
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    #[inline]
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Sorted break hours.
    #[inline]
    pub fn breaks(&self) -> &[u8] {
        &self.breaks
    }

    /// `hour` lies within `[start, end)`, break or not.
    #[inline]
    pub fn covers(&self, hour: u8) -> bool {
        (self.start_hour..self.end_hour).contains(&hour)
    }

    #[inline]
    pub fn is_break(&self, hour: u8) -> bool {
        self.breaks.contains(&hour)
    }

    /// `hour` is a bookable working hour: covered and not a break.
    #[inline]
    pub fn is_working_hour(&self, hour: u8) -> bool {
        self.covers(hour) && !self.is_break(hour)
    }

    /// Ascending iterator over bookable hours.
    pub fn working_hours(&self) -> impl Iterator<Item = u8> + '_ {
        (self.start_hour..self.end_hour).filter(|&h| !self.is_break(h))
    }
}
