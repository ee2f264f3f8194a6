//! Recurring booking planner.
//!
//! Extends a first occurrence into a fixed-cadence series.  Each subsequent
//! occurrence lands at `first_day + k·interval` at the same hour; when that
//! exact slot conflicts the planner shifts to the closest legal hour on the
//! same day.  A day with no legal alternative records a failure and planning
//! continues — one bad week never aborts the series.
//!
//! Occurrences fall on distinct days (the interval is at least one day), so
//! planned slots cannot collide with each other and the snapshot index can
//! be consulted directly.

use thiserror::Error;

use clinic_core::{CustomerId, SessionLength, SimTime, WorkerId};
use clinic_schedule::{can_book, span_hours, BookingRequest, Denial, Worker};

use crate::suggest::PlannerSnapshot;

// ── Request / outcome types ───────────────────────────────────────────────────

/// A fixed-cadence series request.
#[derive(Copy, Clone, Debug)]
pub struct RecurrenceRequest {
    pub worker: WorkerId,
    pub customer: CustomerId,
    /// Day of the first occurrence.
    pub first_day: u32,
    /// Default start hour for every occurrence.
    pub hour: u8,
    /// Days between occurrences (e.g. 7 for weekly).
    pub interval_days: u32,
    /// Total occurrences, the first included.
    pub count: u32,
    pub length: SessionLength,
    pub is_virtual: bool,
}

/// One successfully planned slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence {
    pub day: u32,
    pub hour: u8,
}

/// Why one slot of the series cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OccurrenceConflict {
    #[error(transparent)]
    Slot(#[from] Denial),

    #[error("customer already booked at hour {hour}")]
    CustomerBusy { hour: u8 },
}

/// A skipped occurrence: no legal hour existed on its day.
///
/// `reason` is the conflict found at the series' default hour — what forced
/// the (failed) search for an alternative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesFailure {
    /// Zero-based occurrence number within the series.
    pub occurrence: u32,
    pub day: u32,
    pub reason: OccurrenceConflict,
}

/// Planner output: the slots that worked and the occurrences that did not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesPlan {
    pub planned: Vec<Occurrence>,
    pub failures: Vec<SeriesFailure>,
}

/// Outright rejection of the whole series.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SeriesDenied {
    #[error("series start {0} is not in the future")]
    FirstInPast(SimTime),

    #[error("series start conflicts: {0}")]
    FirstConflict(OccurrenceConflict),

    #[error("unknown worker {0}")]
    UnknownWorker(WorkerId),

    #[error("invalid series: {0}")]
    Invalid(String),
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Plan a recurring series against the snapshot at `now`.
///
/// Rejects the whole series when the first occurrence is not strictly in the
/// future ([`SeriesDenied::FirstInPast`]) or conflicts
/// ([`SeriesDenied::FirstConflict`]) — distinct reasons, per the calendar's
/// rebooking flow.  Later occurrences shift or fail independently.
pub fn plan_recurring(
    snap: &PlannerSnapshot<'_>,
    now: SimTime,
    req: &RecurrenceRequest,
) -> Result<SeriesPlan, SeriesDenied> {
    if req.interval_days == 0 {
        return Err(SeriesDenied::Invalid("interval must be at least 1 day".into()));
    }
    if req.count == 0 {
        return Err(SeriesDenied::Invalid("count must be at least 1".into()));
    }
    let Some(worker) = snap.workers.iter().find(|w| w.id == req.worker) else {
        return Err(SeriesDenied::UnknownWorker(req.worker));
    };

    let first = SimTime { day: req.first_day, hour: req.hour, minute: 0 };
    if first <= now {
        return Err(SeriesDenied::FirstInPast(first));
    }

    // Hours this customer is already committed to, across all workers.
    let customer_hours: Vec<(u32, u8)> = snap
        .sessions
        .iter()
        .filter(|s| s.customer == req.customer && s.occupies_calendar())
        .flat_map(|s| span_hours(s.hour, s.length).into_iter().map(move |h| (s.day, h)))
        .collect();

    if let Some(conflict) = slot_conflict(snap, &customer_hours, worker, req, first.day, req.hour) {
        return Err(SeriesDenied::FirstConflict(conflict));
    }

    let mut plan = SeriesPlan::default();
    plan.planned.push(Occurrence { day: first.day, hour: req.hour });

    for k in 1..req.count {
        let day = req.first_day + k * req.interval_days;
        match slot_conflict(snap, &customer_hours, worker, req, day, req.hour) {
            None => plan.planned.push(Occurrence { day, hour: req.hour }),
            Some(conflict) => match closest_alternative(snap, &customer_hours, worker, req, day) {
                Some(hour) => plan.planned.push(Occurrence { day, hour }),
                None => plan.failures.push(SeriesFailure { occurrence: k, day, reason: conflict }),
            },
        }
    }

    Ok(plan)
}

// ── Conflict checks ───────────────────────────────────────────────────────────

/// Check one candidate slot: booking constraints first, then whether the
/// customer is already committed to an overlapping hour elsewhere.
fn slot_conflict(
    snap: &PlannerSnapshot<'_>,
    customer_hours: &[(u32, u8)],
    worker: &Worker,
    req: &RecurrenceRequest,
    day: u32,
    hour: u8,
) -> Option<OccurrenceConflict> {
    let request = BookingRequest { day, hour, length: req.length, is_virtual: req.is_virtual };
    if let Err(denial) = can_book(snap.facility, snap.index, &worker.workweek, worker.id, &request) {
        return Some(OccurrenceConflict::Slot(denial));
    }
    span_hours(hour, req.length)
        .into_iter()
        .find(|&h| customer_hours.contains(&(day, h)))
        .map(|hour| OccurrenceConflict::CustomerBusy { hour })
}

/// The legal hour on `day` closest to the series' default hour: smallest
/// |Δhour|, earlier hour on ties.
fn closest_alternative(
    snap: &PlannerSnapshot<'_>,
    customer_hours: &[(u32, u8)],
    worker: &Worker,
    req: &RecurrenceRequest,
    day: u32,
) -> Option<u8> {
    let mut candidates: Vec<u8> = worker
        .workweek
        .working_hours()
        .filter(|&h| h != req.hour)
        .collect();
    candidates.sort_by_key(|&h| (h.abs_diff(req.hour), h));
    candidates
        .into_iter()
        .find(|&h| slot_conflict(snap, customer_hours, worker, req, day, h).is_none())
}
