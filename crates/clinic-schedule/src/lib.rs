//! `clinic-schedule` — work schedules, slot model, booking constraints, and
//! roster loading.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`workweek`]    | `WorkSchedule` (validated work hours and breaks)      |
//! | [`slot`]        | `Occupant`, `ScheduleIndex`, `span_hours`             |
//! | [`constraints`] | `Facility`, `BookingRequest`, `can_book`, `Denial`    |
//! | [`roster`]      | `Worker`, `load_roster_csv`, `load_roster_reader`     |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                  |
//!
//! # Slot model (summary)
//!
//! A slot is one (day, hour, worker) triple.  `ScheduleIndex` is the derived
//! occupancy table over the session collection:
//!
//! ```text
//! occupant_at(d, h, w)   = session id | break | training | empty
//! in_person_count(d, h)  = concurrent in-person sessions (room usage)
//! ```
//!
//! The index is a cache over sessions and must be rebuilt from them after
//! any external load — it is never the source of truth.

pub mod constraints;
pub mod error;
pub mod roster;
pub mod slot;
pub mod workweek;

#[cfg(test)]
mod tests;

pub use constraints::{can_book, BookingRequest, Denial, Facility};
pub use error::{ScheduleError, ScheduleResult};
pub use roster::{load_roster_csv, load_roster_reader, worker_by_id, Worker};
pub use slot::{span_hours, Occupant, ScheduleIndex, HOURS_PER_DAY};
pub use workweek::{WorkSchedule, MAX_BREAKS, MIN_WORKING_HOURS};
