//! Booking suggestion generator.
//!
//! Scans customers needing a next appointment, classifies how urgently they
//! are due, picks an eligible worker, and searches the calendar for the
//! earliest legal slot.  Fully deterministic for a given snapshot: same
//! inputs, same suggestions, in the same order.
//!
//! Suggestions are ephemeral — recomputed on demand, never persisted, and
//! nothing is reserved by producing one.

use clinic_core::{CustomerId, Session, SessionLength, SessionStatus, SimTime, WorkerId};
use clinic_schedule::{can_book, BookingRequest, Facility, ScheduleIndex, Worker};

use crate::customer::{Cadence, Customer, DeliveryMode};

/// A follow-up due within this many days is classified `DueSoon`.
pub const DUE_SOON_DAYS: u32 = 3;

/// How many days ahead the slot search scans before giving up.
pub const SEARCH_HORIZON_DAYS: u32 = 14;

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Read-only view of everything the booking searches consult.
///
/// Borrowed for the duration of one generator/planner call; the callers own
/// the underlying collections and never mutate them mid-call.
#[derive(Copy, Clone)]
pub struct PlannerSnapshot<'a> {
    pub facility: &'a Facility,
    pub index: &'a ScheduleIndex,
    pub workers: &'a [Worker],
    pub customers: &'a [Customer],
    pub sessions: &'a [Session],
}

// ── Urgency ───────────────────────────────────────────────────────────────────

/// How soon a customer's next session is due.  `Ord` follows suggestion
/// priority: `Overdue` sorts before `DueSoon` before `Normal`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Urgency {
    Overdue,
    DueSoon,
    Normal,
}

// ── BookingSuggestion ─────────────────────────────────────────────────────────

/// One proposed booking.  Ephemeral output of [`suggest_bookings`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookingSuggestion {
    pub customer: CustomerId,
    pub worker: WorkerId,
    pub day: u32,
    pub hour: u8,
    pub length: SessionLength,
    pub is_virtual: bool,
    pub urgency: Urgency,
    /// Human-readable explanation for presentation.
    pub reason: String,
}

/// Generator output: ranked suggestions plus customers no worker can serve.
#[derive(Clone, Debug, Default)]
pub struct SuggestionBatch {
    pub suggestions: Vec<BookingSuggestion>,
    /// Customers needing a session for whom no eligible worker or slot was
    /// found.  No suggestion is produced for these.
    pub unschedulable: Vec<CustomerId>,
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Produce up to `max` booking suggestions for the given snapshot at `now`.
///
/// Output ordering: `Overdue` before `DueSoon` before `Normal`; within equal
/// urgency ascending by due-proximity (customers with no due date last),
/// ties broken by customer id.
pub fn suggest_bookings(snap: &PlannerSnapshot<'_>, now: SimTime, max: usize) -> SuggestionBatch {
    let mut batch = SuggestionBatch::default();
    // (urgency, proximity, customer id) sort keys alongside each suggestion.
    let mut keyed: Vec<(Urgency, i64, u32, BookingSuggestion)> = Vec::new();

    for customer in snap.customers {
        if customer.sessions_remaining == 0 || has_upcoming_session(snap.sessions, customer.id) {
            continue;
        }

        let due_day = follow_up_due_day(snap.sessions, customer);
        let urgency = classify_urgency(due_day, now.day);
        let proximity = due_day.map_or(i64::MAX, |d| d as i64 - now.day as i64);

        let Some(worker) = pick_worker(snap.workers, customer) else {
            batch.unschedulable.push(customer.id);
            continue;
        };

        let Some((day, hour, mode)) =
            find_earliest_slot(snap, now, worker, customer.preferred_mode, customer.preferred_length)
        else {
            batch.unschedulable.push(customer.id);
            continue;
        };

        let reason = match (urgency, due_day) {
            (Urgency::Overdue, Some(d)) => format!("follow-up overdue since day {d}"),
            (_, Some(d)) => format!("follow-up due day {d}"),
            (_, None) => "needs first session".to_string(),
        };

        keyed.push((
            urgency,
            proximity,
            customer.id.0,
            BookingSuggestion {
                customer: customer.id,
                worker: worker.id,
                day,
                hour,
                length: customer.preferred_length,
                is_virtual: mode.is_virtual(),
                urgency,
                reason,
            },
        ));
    }

    keyed.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
    batch.suggestions = keyed.into_iter().map(|(_, _, _, s)| s).take(max).collect();
    batch
}

// ── Classification ────────────────────────────────────────────────────────────

/// The day the customer's next session becomes due, if a cadence applies.
///
/// `None` for one-time customers and for customers with no prior completed
/// session (they "need a first session" and default to `Normal` urgency).
pub fn follow_up_due_day(sessions: &[Session], customer: &Customer) -> Option<u32> {
    let interval = match customer.cadence {
        Cadence::OneTime => return None,
        Cadence::EveryDays(n) => n.get(),
    };
    let last_completed = sessions
        .iter()
        .filter(|s| s.customer == customer.id && s.status == SessionStatus::Completed)
        .map(|s| s.day)
        .max()?;
    Some(last_completed + interval)
}

/// Classify urgency from a due day relative to `today`.
pub fn classify_urgency(due_day: Option<u32>, today: u32) -> Urgency {
    match due_day {
        Some(d) if d < today => Urgency::Overdue,
        Some(d) if d <= today + DUE_SOON_DAYS => Urgency::DueSoon,
        _ => Urgency::Normal,
    }
}

fn has_upcoming_session(sessions: &[Session], customer: CustomerId) -> bool {
    sessions
        .iter()
        .any(|s| s.customer == customer && s.occupies_calendar())
}

// ── Worker selection ──────────────────────────────────────────────────────────

/// Prefer the customer's assigned worker when eligible; otherwise the
/// lowest-id eligible worker.  `None` when nobody holds the required
/// certification.
pub fn pick_worker<'a>(workers: &'a [Worker], customer: &Customer) -> Option<&'a Worker> {
    let eligible = |w: &Worker| customer.required_cert.is_none_or(|cert| w.holds(cert));

    if let Some(assigned) = customer.assigned_worker
        && let Some(w) = workers.iter().find(|w| w.id == assigned)
        && eligible(w)
    {
        return Some(w);
    }
    workers.iter().find(|w| eligible(w))
}

// ── Slot search ───────────────────────────────────────────────────────────────

/// Earliest legal `(day, hour, mode)` strictly after `now`, scanning the
/// preferred delivery mode across the whole horizon first and falling back
/// to the other mode only when the preferred one yields nothing.
fn find_earliest_slot(
    snap: &PlannerSnapshot<'_>,
    now: SimTime,
    worker: &Worker,
    preferred: DeliveryMode,
    length: SessionLength,
) -> Option<(u32, u8, DeliveryMode)> {
    for mode in [preferred, preferred.other()] {
        // A locked-telehealth facility can never host a virtual slot; skip
        // the scan instead of collecting per-hour denials.
        if mode.is_virtual() && !snap.facility.telehealth_unlocked {
            continue;
        }
        for day in now.day..now.day + SEARCH_HORIZON_DAYS {
            for hour in worker.workweek.working_hours() {
                if (SimTime { day, hour, minute: 0 }) <= now {
                    continue;
                }
                let request = BookingRequest { day, hour, length, is_virtual: mode.is_virtual() };
                if can_book(snap.facility, snap.index, &worker.workweek, worker.id, &request)
                    .is_ok()
                {
                    return Some((day, hour, mode));
                }
            }
        }
    }
    None
}
