//! The mark-and-sweep engine: public API and phase machine.
//!
//! This module drives the host scan callback during mark, the host dead
//! callback during sweep, and enforces a single-threaded, stop-the-world
//! contract with no internal synchronization.

use std::ptr::NonNull;

use crate::callback::{DeadFn, ScanFn};
use crate::node::GcNode;
use crate::registry::Registry;

/// Statistics snapshot, available when the `stats` feature is enabled.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorStats {
    /// Total nodes currently tracked by the collector (`white + alive`).
    pub registered: usize,
    pub white: usize,
    pub alive: usize,
}

/// An embeddable mark-and-sweep collector.
///
/// `Collector<H>` owns no user data and performs no allocation. It
/// tracks a set of nodes registered via [`Collector::register`] and, on
/// [`Collector::collect`], partitions them into reachable/unreachable
/// using the host-supplied `scan`/`dead` callbacks.
///
/// `H` is host context data, passed back to both callbacks on every
/// invocation — the analogue of `lgc_t::userdata` in the C
/// implementation this design is based on.
pub struct Collector<H> {
    userdata: H,
    registry: Registry,
    scan: ScanFn<H>,
    dead: DeadFn<H>,
}

impl<H> Collector<H> {
    /// Initializes a new collector. Both sentinels start empty;
    /// `white_color` starts at 0.
    pub fn new(userdata: H, scan: ScanFn<H>, dead: DeadFn<H>) -> Self {
        Self {
            userdata,
            registry: Registry::new(),
            scan,
            dead,
        }
    }

    /// Accesses the host context data passed to [`Collector::new`].
    pub fn userdata(&self) -> &H {
        &self.userdata
    }

    /// Registers `node` as a new collectible object.
    ///
    /// `node` is pushed onto the white list with the collector's current
    /// `white_color`; it becomes visible to the next `collect`.
    /// Registration during a `collect` call is not supported.
    ///
    /// # Safety
    ///
    /// `node` must point to a freshly constructed [`GcNode`] (unlinked,
    /// color zero) that outlives this collector or is deregistered by
    /// being reported dead first. The caller must not register the same
    /// node twice.
    pub unsafe fn register(&self, node: NonNull<GcNode>) {
        tracing::trace!(node = ?node.as_ptr(), "registering node");
        unsafe { self.registry.register(node) };
    }

    /// Runs one full mark-and-sweep collection cycle.
    ///
    /// Invokes the dead callback exactly once per unreachable registered
    /// node. A second `collect()` call with no intervening mutation is a
    /// no-op: zero dead callbacks, identical surviving set.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn collect(&self) {
        self.registry.assert_precollection_invariants();

        tracing::trace!("mark: seeding roots");
        self.mark();

        tracing::trace!("sweep: reporting dead and promoting survivors");
        let reported = self.sweep();

        tracing::debug!(reported_dead = reported, "collection cycle complete");
    }

    /// Seeds the alive list from roots, then drains the grey frontier
    /// tail-to-head, scanning each node exactly once.
    fn mark(&self) {
        let mut alive_cb = |target: NonNull<GcNode>| self.registry.mark_alive(target);
        (self.scan)(self, None, &mut alive_cb);

        self.registry.drain_grey_frontier(|node| {
            let mut alive_cb = |target: NonNull<GcNode>| self.registry.mark_alive(target);
            (self.scan)(self, Some(node), &mut alive_cb);
        });
    }

    /// Reports the dead, splices survivors back onto the white list,
    /// flips `white_color`. Returns the number of dead callbacks issued.
    fn sweep(&self) -> usize {
        let mut reported = 0usize;
        self.registry.report_dead(|node| {
            reported += 1;
            (self.dead)(self, node);
        });
        self.registry.promote_survivors_and_flip();
        reported
    }

    /// Returns a snapshot of the white/alive list sizes. Only available
    /// with the `stats` feature; walks both lists in O(n).
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> CollectorStats {
        let white = self.registry.white_count();
        let alive = self.registry.alive_count();
        CollectorStats {
            registered: white + alive,
            white,
            alive,
        }
    }
}
