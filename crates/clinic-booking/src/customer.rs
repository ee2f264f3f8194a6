//! Customer model: cadence, delivery preference, remaining need.

use std::num::NonZeroU32;

use clinic_core::{CertId, CustomerId, SessionLength, WorkerId};

// ── DeliveryMode ──────────────────────────────────────────────────────────────

/// How a customer prefers to attend.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeliveryMode {
    InPerson,
    Virtual,
}

impl DeliveryMode {
    /// The opposite mode, used for fallback searches.
    #[inline]
    pub fn other(self) -> DeliveryMode {
        match self {
            DeliveryMode::InPerson => DeliveryMode::Virtual,
            DeliveryMode::Virtual => DeliveryMode::InPerson,
        }
    }

    #[inline]
    pub fn is_virtual(self) -> bool {
        self == DeliveryMode::Virtual
    }
}

// ── Cadence ───────────────────────────────────────────────────────────────────

/// Preferred interval between a customer's sessions.
///
/// The interval is a `NonZeroU32` so a zero-day cadence is unrepresentable.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cadence {
    /// A single engagement; no follow-up is ever due.
    OneTime,
    /// A follow-up is due this many days after the last completed session.
    EveryDays(NonZeroU32),
}

impl Cadence {
    /// The common weekly cadence.
    pub fn weekly() -> Cadence {
        Cadence::EveryDays(NonZeroU32::new(7).unwrap())
    }

    /// `None` for invalid (zero) intervals.
    pub fn every_days(days: u32) -> Option<Cadence> {
        NonZeroU32::new(days).map(Cadence::EveryDays)
    }

    /// Interval in days, or `None` for one-time customers.
    #[inline]
    pub fn interval_days(self) -> Option<u32> {
        match self {
            Cadence::OneTime => None,
            Cadence::EveryDays(n) => Some(n.get()),
        }
    }
}

// ── Customer ──────────────────────────────────────────────────────────────────

/// One client of the practice.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    pub id: CustomerId,
    /// The worker this customer usually sees, if any.
    pub assigned_worker: Option<WorkerId>,
    pub cadence: Cadence,
    pub preferred_mode: DeliveryMode,
    pub preferred_length: SessionLength,
    /// Certification a worker must hold to serve this customer, if any.
    pub required_cert: Option<CertId>,
    /// Sessions still needed; 0 means fully served.
    pub sessions_remaining: u32,
}
