//! `clinic-sim` — cooperative tick loop for the clinic calendar simulation.
//!
//! # One pump, four outcomes
//!
//! ```text
//! loop.pump(now_ms, &mut state, &mut hooks):
//!   stopped                         → Pump::NotRunning
//!   elapsed < tick threshold        → Pump::Throttled   (nothing consumed)
//!   paused / speed 0 / < 1 minute   → Pump::Idle        (fraction carried)
//!   otherwise                       → Pump::Advanced:
//!     ① clock     — BusinessDay::advance, SimState.time updated
//!     ② boundary  — day-ended, day-started, hour-changed, minute-changed,
//!                   then the full Advance, in that fixed order
//!     ③ progress  — every InProgress session absorbs the minutes; those
//!                   reaching full length complete
//!     ④ starts    — every Scheduled session whose start instant was
//!                   crossed begins
//! ```
//!
//! Skips ([`SimLoop::skip_to`], [`SimLoop::skip_to_next_session`]) reuse
//! the same apply path with endpoint-only boundary flags and no progress
//! phase: a jump is not elapsed treatment time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use clinic_core::{BusinessDay, SimTime};
//! use clinic_sim::{NoopHooks, SimLoop, SimState};
//!
//! let mut state = SimState::new(SimTime::new(1, 8, 0)?, 5);
//! let mut sim = SimLoop::new(BusinessDay::default());
//! sim.start();
//! // from the host's timer callback:
//! sim.pump(now_ms, &mut state, &mut NoopHooks);
//! ```
//!
//! # Cargo features
//!
//! | Feature | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to [`SimState`].            |

pub mod hooks;
pub mod sim;
pub mod state;


pub use hooks::{HookFault, HookResult, NoopHooks, SimHooks};
pub use sim::{DEFAULT_TICK_THRESHOLD_MS, Pump, SimLoop, Ticked};
pub use state::SimState;
