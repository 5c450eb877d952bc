//! Stateful estimation engine: re-seedable synchronous and asynchronous
//! pose estimation over a stream of correspondence sets.
use std::sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};
use std::thread::{self, JoinHandle};

use crate::geometry::transform::Transform;
use crate::optimization::{
    errors::RellocResult,
    pose_optimizer::{
        api::estimate_pose,
        traits::{EstimateOptions, EstimationResult},
    },
};
use crate::residual::model::Correspondences;

use super::observers::{Publication, ResultBus, Subscription};

/// Long-lived estimator that retains its last result between calls.
///
/// Each successful estimation is retained and published to all
/// subscriptions; the retained transform seeds the next call unless an
/// explicit guess overrides it. [`reset`](Self::reset) forgets the retained
/// result, so the next un-seeded call starts from the identity again.
///
/// Every call is assigned a sequence number at request time, carried on the
/// resulting [`Publication`]; observers compare it across receives to spot
/// an overlapping background call that completed late and overwrote a newer
/// result.
///
/// The engine is `Send + Sync`; all mutable state lives behind the shared
/// result bus and atomic counters, so one engine can be shared across
/// threads behind an `Arc`.
#[derive(Debug)]
pub struct RelativeLocalizationEngine {
    bus: Arc<ResultBus>,
    opts: EstimateOptions,
    seq: AtomicU64,
    in_flight: Arc<AtomicUsize>,
}

impl RelativeLocalizationEngine {
    /// Create an engine with no retained result.
    pub fn new(opts: EstimateOptions) -> Self {
        Self {
            bus: Arc::new(ResultBus::new()),
            opts,
            seq: AtomicU64::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Forget the retained result.
    ///
    /// The next un-seeded estimation starts from the identity transform.
    /// Nothing is emitted to observers, and estimations already in flight
    /// are unaffected.
    pub fn reset(&self) {
        self.bus.clear();
        tracing::debug!("engine reset, retained result cleared");
    }

    /// The most recent successful estimation, if any, with its call
    /// sequence number.
    pub fn latest(&self) -> Option<Publication> {
        self.bus.latest()
    }

    /// Whether any asynchronous estimation is currently running.
    pub fn is_estimating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Create a new observer handle.
    ///
    /// The subscription's first receive replays the engine's current result
    /// (a `None` sentinel before the first estimate); later receives block
    /// until a newer result is published.
    pub fn subscribe(&self) -> Subscription {
        Subscription::new(Arc::clone(&self.bus))
    }

    /// Run one estimation on the calling thread.
    ///
    /// The seed is `initial_guess` when given, else the retained result's
    /// transform, else the identity. On success the result is retained and
    /// published to all subscriptions; non-convergence is still a success
    /// (reported via the result's `converged` flag and a warning log).
    /// Precondition failures return an error and leave the retained state
    /// untouched.
    ///
    /// # Errors
    /// Propagates any `RellocError` from
    /// [`estimate_pose`](crate::optimization::pose_optimizer::api::estimate_pose).
    pub fn estimate(
        &self, correspondences: &Correspondences, initial_guess: Option<Transform>,
    ) -> RellocResult<EstimationResult> {
        let seq = self.next_seq();
        let seed = self.resolve_seed(initial_guess);
        let result = estimate_pose(correspondences, &seed, &self.opts)?;
        if !result.converged {
            tracing::warn!(
                status = %result.status,
                iterations = result.iterations,
                residual = result.residual,
                "estimation stopped without meeting its threshold"
            );
        }
        self.bus.publish(seq, result.clone());
        Ok(result)
    }

    /// Run one estimation on a background thread.
    ///
    /// The seed and the sequence number are resolved at call time with the
    /// same precedence as [`estimate`](Self::estimate), so a concurrent
    /// completion cannot change which seed this call uses. The returned
    /// handle yields the same result the subscriptions receive.
    ///
    /// Overlapping calls are neither serialized nor deduplicated: each
    /// publishes when it finishes, so a slower earlier call can overwrite a
    /// faster later one. Because the sequence number reflects call order,
    /// that overwrite surfaces to observers as a decreasing
    /// [`Publication::seq`]; callers who need strict ordering should join
    /// each handle before issuing the next call.
    pub fn estimate_async(
        &self, correspondences: Correspondences, initial_guess: Option<Transform>,
    ) -> JoinHandle<RellocResult<EstimationResult>> {
        let seq = self.next_seq();
        let seed = self.resolve_seed(initial_guess);
        let opts = self.opts;
        let bus = Arc::clone(&self.bus);
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::AcqRel);
        thread::spawn(move || {
            let outcome = estimate_pose(&correspondences, &seed, &opts);
            if let Ok(result) = &outcome {
                if !result.converged {
                    tracing::warn!(
                        status = %result.status,
                        iterations = result.iterations,
                        residual = result.residual,
                        "estimation stopped without meeting its threshold"
                    );
                }
                bus.publish(seq, result.clone());
            }
            in_flight.fetch_sub(1, Ordering::AcqRel);
            outcome
        })
    }

    /// Seed precedence: explicit guess, retained result, identity.
    fn resolve_seed(&self, initial_guess: Option<Transform>) -> Transform {
        initial_guess
            .or_else(|| self.bus.latest().map(|p| p.result.transform))
            .unwrap_or_else(Transform::identity)
    }

    /// Next call-order sequence number, starting at 1.
    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::AcqRel) + 1
    }
}
