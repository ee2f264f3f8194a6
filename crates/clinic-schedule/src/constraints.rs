//! Booking constraints: can a proposed session be placed?
//!
//! Denials are plain values, not errors — callers branch on them, and the
//! booking searches treat them as "keep looking".  Every denial names the
//! first failing hour of the span so a rejected multi-hour request is
//! diagnosable.

use thiserror::Error;

use clinic_core::{SessionLength, WorkerId};

use crate::slot::{span_hours, ScheduleIndex};
use crate::workweek::WorkSchedule;

// ── Facility ──────────────────────────────────────────────────────────────────

/// Shared facility resources.
///
/// Rooms are fungible and never reserved by name: capacity is evaluated per
/// hour as a count of concurrent in-person sessions.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub room_count: u32,
    pub telehealth_unlocked: bool,
}

// ── BookingRequest ────────────────────────────────────────────────────────────

/// A proposed placement, before any session exists.
#[derive(Copy, Clone, Debug)]
pub struct BookingRequest {
    pub day: u32,
    pub hour: u8,
    pub length: SessionLength,
    pub is_virtual: bool,
}

// ── Denial ────────────────────────────────────────────────────────────────────

/// Why a proposed session cannot be placed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Denial {
    #[error("telehealth locked")]
    TelehealthLocked,

    #[error("no rooms available at hour {hour}")]
    NoRooms { hour: u8 },

    #[error("hour {hour} is outside the worker's work hours")]
    OutsideHours { hour: u8 },

    #[error("hour {hour} falls on the worker's break")]
    OnBreak { hour: u8 },

    #[error("worker already booked at hour {hour}")]
    SlotTaken { hour: u8 },
}

// ── can_book ──────────────────────────────────────────────────────────────────

/// Decide whether `request` can be placed for `worker`.
///
/// Rules, checked in order:
///
/// 1. A virtual request requires telehealth to be unlocked; room capacity is
///    then irrelevant.
/// 2. An in-person request needs a free room in *every* spanned hour:
///    concurrent in-person sessions across all workers must stay below
///    `facility.room_count`.
/// 3. Every spanned hour must be one of the worker's working hours — inside
///    the work window and not a break.
/// 4. Every spanned hour must be free of other occupants for this worker.
///
/// The whole span is rejected as soon as any hour fails; the denial carries
/// the first failing hour.
pub fn can_book(
    facility: &Facility,
    index: &ScheduleIndex,
    workweek: &WorkSchedule,
    worker: WorkerId,
    request: &BookingRequest,
) -> Result<(), Denial> {
    let span = span_hours(request.hour, request.length);

    if request.is_virtual {
        if !facility.telehealth_unlocked {
            return Err(Denial::TelehealthLocked);
        }
    } else {
        for &hour in &span {
            if index.in_person_count(request.day, hour) >= facility.room_count {
                return Err(Denial::NoRooms { hour });
            }
        }
    }

    for &hour in &span {
        if !workweek.covers(hour) {
            return Err(Denial::OutsideHours { hour });
        }
        if workweek.is_break(hour) {
            return Err(Denial::OnBreak { hour });
        }
    }

    for &hour in &span {
        if index.occupant_at(request.day, hour, worker).is_some() {
            return Err(Denial::SlotTaken { hour });
        }
    }

    Ok(())
}
