//! `clinic-booking` — the booking suggestion generator and recurring-booking
//! planner.
//!
//! Both entry points are pure functions over an explicit
//! [`PlannerSnapshot`]: they read the slot model and booking constraints but
//! never mutate simulated time or the session collection.  Committing a
//! suggestion or a planned series is the caller's job.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`customer`] | `Customer`, `Cadence`, `DeliveryMode`                    |
//! | [`suggest`]  | `suggest_bookings`, `BookingSuggestion`, `Urgency`       |
//! | [`recur`]    | `plan_recurring`, `SeriesPlan`, `SeriesDenied`           |

pub mod customer;
pub mod recur;
pub mod suggest;


pub use customer::{Cadence, Customer, DeliveryMode};
pub use recur::{
    plan_recurring, Occurrence, OccurrenceConflict, RecurrenceRequest, SeriesDenied, SeriesFailure,
    SeriesPlan,
};
pub use suggest::{
    classify_urgency, follow_up_due_day, pick_worker, suggest_bookings, BookingSuggestion,
    PlannerSnapshot, SuggestionBatch, Urgency, DUE_SOON_DAYS, SEARCH_HORIZON_DAYS,
};
