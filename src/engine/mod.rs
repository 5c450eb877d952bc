//! engine — stateful estimation front-end with observer fan-out.
//!
//! Purpose
//! -------
//! Wrap the stateless pose optimizer in a long-lived
//! [`RelativeLocalizationEngine`] that retains its last result between
//! calls, seeds successive estimations from it, and multicasts every new
//! result to subscribed observers.
//!
//! Key behaviors
//! -------------
//! - Seed precedence per call: explicit guess, else retained result, else
//!   identity; [`RelativeLocalizationEngine::reset`] forgets the retained
//!   result without emitting anything.
//! - Synchronous ([`RelativeLocalizationEngine::estimate`]) and
//!   asynchronous ([`RelativeLocalizationEngine::estimate_async`])
//!   estimation with identical semantics; the async path resolves its seed
//!   at call time and publishes when its own run completes.
//! - Replay-latest observer bus ([`observers::ResultBus`] /
//!   [`observers::Subscription`]): a new subscription's first receive
//!   replays the current value, later receives wait for newer publications,
//!   and slow observers never block the engine.
//!
//! Invariants & assumptions
//! ------------------------
//! - Precondition failures surface as `RellocError` before any numerical
//!   work and leave the retained state untouched.
//! - Non-convergence is a published result with `converged == false`, never
//!   an error; the engine logs it via `tracing::warn`.
//! - Overlapping asynchronous calls are neither serialized nor
//!   deduplicated; each publication carries the call-order sequence number
//!   of the request that produced it ([`observers::Publication::seq`]), so
//!   an observer that sees the sequence decrease knows a late, stale
//!   completion overwrote a newer result.
//!
//! Testing notes
//! -------------
//! - Unit tests cover seed precedence, retention/publication, error paths,
//!   bus replay and wakeup semantics, and the async round trip; the
//!   integration tests drive the engine over multi-step scenes.

pub mod estimator;
pub mod observers;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::estimator::RelativeLocalizationEngine;
pub use self::observers::{Publication, ResultBus, Subscription};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::estimator::RelativeLocalizationEngine;
    pub use super::observers::{Publication, Subscription};
}
