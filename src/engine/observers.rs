//! Replay-latest result bus shared between the engine and its observers.
//!
//! The bus retains only the newest [`Publication`]: an [`EstimationResult`]
//! tagged with the sequence number of the call that produced it. Observers
//! hold a [`Subscription`]; the first receive replays whatever is current (a
//! `None` sentinel before the first estimate), later receives block until a
//! newer publication arrives. Slow observers never block the publisher and
//! only ever see the latest value.
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::optimization::pose_optimizer::traits::EstimationResult;

/// A published estimation result tagged with its call-order sequence number.
///
/// `seq` is assigned when the estimation is *requested*, not when it
/// completes. Publications therefore normally arrive with increasing `seq`;
/// when overlapping background estimations complete out of order, an
/// observer that sees `seq` go backwards knows a late, stale completion has
/// overwritten a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub seq: u64,
    pub result: EstimationResult,
}

#[derive(Debug, Default)]
struct BusState {
    latest: Option<Publication>,
    generation: u64,
}

/// Single-slot multicast channel for estimation results.
///
/// `publish` overwrites the slot, bumps an internal wakeup counter, and
/// wakes all waiting subscribers; `clear` empties the slot without waking
/// anyone, so blocked receivers keep waiting for the next real publication.
/// The wakeup counter orders publications on the bus and is distinct from
/// [`Publication::seq`], which orders the calls that produced them.
#[derive(Debug, Default)]
pub struct ResultBus {
    state: Mutex<BusState>,
    newer: Condvar,
}

impl ResultBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` under `seq` as the newest value and wake all waiting
    /// subscribers.
    pub fn publish(&self, seq: u64, result: EstimationResult) {
        let mut state = self.state.lock();
        state.latest = Some(Publication { seq, result });
        state.generation += 1;
        tracing::debug!(seq, "published estimation result");
        self.newer.notify_all();
    }

    /// Drop the retained value. The wakeup counter is untouched and nobody
    /// is woken, so blocked receivers keep waiting for the next publication.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.latest = None;
    }

    /// The newest retained publication, if any.
    pub fn latest(&self) -> Option<Publication> {
        self.state.lock().latest.clone()
    }
}

/// One observer's handle onto a [`ResultBus`].
///
/// Each subscription tracks the last bus state it consumed. A publication
/// that is overwritten before a subscriber gets around to receiving is
/// simply never seen; the subscriber always gets the newest value and can
/// compare [`Publication::seq`] across receives to spot a stale overwrite.
#[derive(Debug)]
pub struct Subscription {
    bus: Arc<ResultBus>,
    seen: Option<u64>,
}

impl Subscription {
    pub(crate) fn new(bus: Arc<ResultBus>) -> Self {
        Self { bus, seen: None }
    }

    /// Receive a publication.
    ///
    /// The first call replays the bus's current value immediately and may
    /// return `None` if nothing has ever been published. Every later call
    /// blocks until a publication newer than the last one consumed arrives,
    /// then returns it.
    pub fn recv(&mut self) -> Option<Publication> {
        let mut state = self.bus.state.lock();
        match self.seen {
            None => {
                self.seen = Some(state.generation);
                state.latest.clone()
            }
            Some(seen) => {
                while state.generation == seen {
                    self.bus.newer.wait(&mut state);
                }
                self.seen = Some(state.generation);
                state.latest.clone()
            }
        }
    }

    /// Like [`recv`](Self::recv), but gives up after `timeout`.
    ///
    /// Returns `None` either when the wait times out or, on the first call,
    /// when nothing has ever been published.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<Publication> {
        let deadline = Instant::now() + timeout;
        let mut state = self.bus.state.lock();
        match self.seen {
            None => {
                self.seen = Some(state.generation);
                state.latest.clone()
            }
            Some(seen) => {
                while state.generation == seen {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    let result = self.bus.newer.wait_for(&mut state, deadline - now);
                    if result.timed_out() && state.generation == seen {
                        return None;
                    }
                }
                self.seen = Some(state.generation);
                state.latest.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::Transform;
    use std::thread;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Replay-on-subscribe semantics (sentinel before the first publish,
    //   latest value afterwards).
    // - Wakeup of a blocked receiver by a later publish.
    // - Overwrite behavior: a slow subscriber sees only the newest value.
    // - Stale-supersession detection via the publication sequence number.
    // - `clear` leaving blocked receivers waiting.
    // -------------------------------------------------------------------------

    fn result_with_residual(residual: f64) -> EstimationResult {
        let mut r = EstimationResult::trivially_converged(Transform::identity());
        r.residual = residual;
        r
    }

    #[test]
    // Purpose
    // -------
    // Before anything is published, the first receive yields the sentinel.
    //
    // Given
    // -----
    // - A fresh bus and a fresh subscription.
    //
    // Expect
    // ------
    // - `recv` returns `None` immediately, without blocking.
    fn first_recv_on_empty_bus_is_none() {
        // Arrange
        let bus = Arc::new(ResultBus::new());
        let mut sub = Subscription::new(Arc::clone(&bus));

        // Act & Assert
        assert!(sub.recv().is_none());
    }

    #[test]
    // Purpose
    // -------
    // A subscriber created after a publish replays that value on its first
    // receive, sequence number included.
    //
    // Given
    // -----
    // - A bus with one result published under sequence number 1.
    //
    // Expect
    // ------
    // - The first `recv` returns that publication immediately.
    fn late_subscriber_replays_latest() {
        // Arrange
        let bus = Arc::new(ResultBus::new());
        bus.publish(1, result_with_residual(1.0));
        let mut sub = Subscription::new(Arc::clone(&bus));

        // Act
        let got = sub.recv().expect("a publication should be replayed");

        // Assert
        assert_eq!(got.seq, 1);
        assert_eq!(got.result.residual, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // A subscriber that fell behind sees only the newest of several
    // publications.
    //
    // Given
    // -----
    // - Three publications after the subscriber consumed its replay.
    //
    // Expect
    // ------
    // - The next `recv` returns the third result, and a timed receive then
    //   reports nothing newer.
    fn slow_subscriber_sees_only_newest() {
        // Arrange
        let bus = Arc::new(ResultBus::new());
        let mut sub = Subscription::new(Arc::clone(&bus));
        assert!(sub.recv().is_none());

        bus.publish(1, result_with_residual(1.0));
        bus.publish(2, result_with_residual(2.0));
        bus.publish(3, result_with_residual(3.0));

        // Act
        let got = sub.recv().expect("a publication should be delivered");

        // Assert
        assert_eq!(got.seq, 3);
        assert_eq!(got.result.residual, 3.0);
        assert!(sub.recv_timeout(Duration::from_millis(20)).is_none());
    }

    #[test]
    // Purpose
    // -------
    // A late, stale completion that overwrites a newer result is detectable:
    // the observer sees the sequence number go backwards.
    //
    // Given
    // -----
    // - A faster second call publishing under sequence number 2 before the
    //   slower first call publishes under sequence number 1.
    //
    // Expect
    // ------
    // - The subscriber receives seq 2, then seq 1, and the decrease marks
    //   the second delivery as stale.
    fn out_of_order_completion_is_detectable() {
        // Arrange
        let bus = Arc::new(ResultBus::new());
        let mut sub = Subscription::new(Arc::clone(&bus));
        assert!(sub.recv().is_none());

        bus.publish(2, result_with_residual(0.2));
        let fresh = sub.recv().expect("a publication should be delivered");

        // Act
        bus.publish(1, result_with_residual(0.1));
        let stale = sub.recv().expect("a publication should be delivered");

        // Assert
        assert_eq!(fresh.seq, 2);
        assert_eq!(stale.seq, 1);
        assert!(stale.seq < fresh.seq, "a decreasing seq marks a stale overwrite");
    }

    #[test]
    // Purpose
    // -------
    // A blocked receiver is woken by a publish from another thread.
    //
    // Given
    // -----
    // - A subscriber that consumed its replay and blocks in `recv`.
    //
    // Expect
    // ------
    // - A publish from a second thread unblocks it with the new value.
    fn blocked_receiver_is_woken_by_publish() {
        // Arrange
        let bus = Arc::new(ResultBus::new());
        let mut sub = Subscription::new(Arc::clone(&bus));
        assert!(sub.recv().is_none());

        let publisher = {
            let bus = Arc::clone(&bus);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                bus.publish(1, result_with_residual(4.0));
            })
        };

        // Act
        let got = sub.recv().expect("a publication should be delivered");

        // Assert
        publisher.join().expect("publisher thread should not panic");
        assert_eq!(got.result.residual, 4.0);
    }

    #[test]
    // Purpose
    // -------
    // Clearing the bus does not count as a publication.
    //
    // Given
    // -----
    // - A subscriber that consumed a published value, then a `clear`.
    //
    // Expect
    // ------
    // - `latest` is `None`, and a timed receive sees nothing new.
    fn clear_is_not_a_publication() {
        // Arrange
        let bus = Arc::new(ResultBus::new());
        let mut sub = Subscription::new(Arc::clone(&bus));
        bus.publish(1, result_with_residual(5.0));
        assert!(sub.recv().is_some());

        // Act
        bus.clear();

        // Assert
        assert!(bus.latest().is_none());
        assert!(sub.recv_timeout(Duration::from_millis(20)).is_none());
    }
}
