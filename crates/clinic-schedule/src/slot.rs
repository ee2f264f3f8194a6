//! Slot model: who occupies each (day, hour, worker) slot.
//!
//! # Why a rebuildable index
//!
//! Answering "is worker W free at (day, hour)?" straight from the session
//! collection costs O(sessions) per query, and the booking searches ask it
//! thousands of times.  `ScheduleIndex` is the inverted view: a typed
//! two-level table `day → hour → worker → occupant`, with hours stored in a
//! fixed 24-entry array so lookups are a map probe plus an array index.
//!
//! The index is a cache, never the source of truth.  After any external
//! load it must be rebuilt from the session collection via
//! [`ScheduleIndex::rebuild_from_sessions`] — a stale or pruned index is
//! expected and must never desynchronize from sessions.  Non-session
//! markers (breaks, training) are placed by collaborators and are *not*
//! restored by a rebuild.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use clinic_core::{Session, SessionId, SessionLength, WorkerId};

/// Hours in a calendar day; the second index level of the table.
pub const HOURS_PER_DAY: usize = 24;

// ── Occupant ──────────────────────────────────────────────────────────────────

/// What fills one (day, hour, worker) slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    /// A booked session (may be one hour of a multi-hour span).
    Session(SessionId),
    /// A one-off blocked break hour.
    Break,
    /// A training activity.
    Training,
}

// ── Hour span math ────────────────────────────────────────────────────────────

/// The ordered list of calendar hours a session touches.
///
/// Any partially used hour counts as fully occupied: an 80-minute session
/// starting at H yields `[H, H+1]`, a 180-minute one `[H, H+1, H+2]`.
/// Callers are responsible for keeping the span inside the working window.
pub fn span_hours(start_hour: u8, length: SessionLength) -> Vec<u8> {
    (0..length.span_len()).map(|i| start_hour + i).collect()
}

// ── ScheduleIndex ─────────────────────────────────────────────────────────────

/// Per-hour slot state: worker occupancy plus a concurrent in-person count.
#[derive(Clone, Debug, Default, PartialEq)]
struct HourSlots {
    occupants: FxHashMap<WorkerId, Occupant>,
    /// Concurrent in-person sessions this hour, across all workers.  Rooms
    /// are fungible, so capacity is a count, not a room assignment.
    in_person: u32,
}

/// Derived occupancy table over the session collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleIndex {
    days: BTreeMap<u32, Box<[HourSlots; HOURS_PER_DAY]>>,
}

impl ScheduleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the full index from sessions alone.
    ///
    /// Only `Scheduled` and `InProgress` sessions occupy slots; completed and
    /// cancelled ones never do.  The result depends only on the set of
    /// calendar-occupying sessions, so the rebuild is idempotent and
    /// order-independent.
    pub fn rebuild_from_sessions(sessions: &[Session]) -> Self {
        let mut index = Self::new();
        for s in sessions.iter().filter(|s| s.occupies_calendar()) {
            index.place_session(s.id, s.worker, s.day, s.hour, s.length, s.is_virtual);
        }
        index
    }

    /// The occupant of one slot, or `None` when empty.
    ///
    /// Hours past the last calendar hour are vacant by definition: a span
    /// can poke past 23 and the work-hours check is what rejects it.
    pub fn occupant_at(&self, day: u32, hour: u8, worker: WorkerId) -> Option<Occupant> {
        if hour as usize >= HOURS_PER_DAY {
            return None;
        }
        self.days
            .get(&day)
            .and_then(|slots| slots[hour as usize].occupants.get(&worker))
            .copied()
    }

    /// Concurrent in-person sessions at (day, hour), across all workers.
    pub fn in_person_count(&self, day: u32, hour: u8) -> u32 {
        if hour as usize >= HOURS_PER_DAY {
            return 0;
        }
        self.days
            .get(&day)
            .map_or(0, |slots| slots[hour as usize].in_person)
    }

    /// Mark every hour of a session's span as occupied by it.
    ///
    /// The slots are assumed free — run the booking constraints first.
    pub fn place_session(
        &mut self,
        id: SessionId,
        worker: WorkerId,
        day: u32,
        start_hour: u8,
        length: SessionLength,
        is_virtual: bool,
    ) {
        for hour in span_hours(start_hour, length) {
            if hour as usize >= HOURS_PER_DAY {
                continue;
            }
            let slot = &mut self.day_mut(day)[hour as usize];
            slot.occupants.insert(worker, Occupant::Session(id));
            if !is_virtual {
                slot.in_person += 1;
            }
        }
    }

    /// Remove a session's span from the index (cancellation, rebooking).
    ///
    /// Hours not actually occupied by this session are left untouched.
    pub fn remove_session(&mut self, session: &Session) {
        let Some(slots) = self.days.get_mut(&session.day) else {
            return;
        };
        for hour in span_hours(session.hour, session.length) {
            if hour as usize >= HOURS_PER_DAY {
                continue;
            }
            let slot = &mut slots[hour as usize];
            if slot.occupants.get(&session.worker) == Some(&Occupant::Session(session.id)) {
                slot.occupants.remove(&session.worker);
                if !session.is_virtual {
                    slot.in_person = slot.in_person.saturating_sub(1);
                }
            }
        }
    }

    /// Place a non-session marker (break or training) on one slot.
    ///
    /// Markers are collaborator-owned and are not restored by
    /// [`rebuild_from_sessions`].
    pub fn block(&mut self, day: u32, hour: u8, worker: WorkerId, occupant: Occupant) {
        debug_assert!(
            !matches!(occupant, Occupant::Session(_)),
            "sessions are placed via place_session"
        );
        self.day_mut(day)[hour as usize].occupants.insert(worker, occupant);
    }

    /// Number of days with at least one indexed slot.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    fn day_mut(&mut self, day: u32) -> &mut [HourSlots; HOURS_PER_DAY] {
        self.days
            .entry(day)
            .or_insert_with(|| Box::new(std::array::from_fn(|_| HourSlots::default())))
    }
}
