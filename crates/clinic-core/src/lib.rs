//! `clinic-core` — foundational types for the clinic calendar simulation.
//!
//! This crate is a dependency of every other `clinic-*` crate.  It
//! intentionally has no `clinic-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `WorkerId`, `CustomerId`, `SessionId`, `CertId`         |
//! | [`time`]    | `SimTime`, `BusinessDay`, `Advance`, `Pacer`            |
//! | [`session`] | `Session`, `SessionLength`, `SessionStatus`             |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod error;
pub mod ids;
pub mod session;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CertId, CustomerId, SessionId, WorkerId};
pub use session::{Session, SessionLength, SessionStatus};
pub use time::{Advance, BusinessDay, Pacer, SimTime};
