//! Object registry: the white/alive lists and the color state that
//! partitions registered nodes between collection cycles.
//!
//! This is the bookkeeping layer beneath the mark-sweep engine in
//! `gc.rs`: it owns the two sentinels and the current `white_color`, and
//! exposes the list operations the engine composes into `mark`/`sweep`.
//! It does not know about host callbacks at all.

use std::ptr::NonNull;

use crate::color::{black_color, flip, ALIVE_SENTINEL_COLOR, GREY, WHITE_SENTINEL_COLOR};
use crate::list;
use crate::node::GcNode;

pub(crate) struct Registry {
    white_sentinel: Box<GcNode>,
    alive_sentinel: Box<GcNode>,
    white_color: std::cell::Cell<u8>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            white_sentinel: GcNode::new_sentinel(WHITE_SENTINEL_COLOR),
            alive_sentinel: GcNode::new_sentinel(ALIVE_SENTINEL_COLOR),
            white_color: std::cell::Cell::new(0),
        }
    }

    #[inline]
    pub(crate) fn white_color(&self) -> u8 {
        self.white_color.get()
    }

    #[inline]
    fn white_ptr(&self) -> NonNull<GcNode> {
        NonNull::from(self.white_sentinel.as_ref())
    }

    #[inline]
    fn alive_ptr(&self) -> NonNull<GcNode> {
        NonNull::from(self.alive_sentinel.as_ref())
    }

    /// Registers a freshly constructed node (unlinked, color zero).
    /// Pushed onto the white list with the current white color.
    ///
    /// # Safety
    ///
    /// `node` must not already be registered with this or any other
    /// registry, and must outlive every future call involving it.
    pub(crate) unsafe fn register(&self, node: NonNull<GcNode>) {
        unsafe {
            debug_assert!(node.as_ref().next.get().is_none(), "register: node already linked");
            debug_assert!(node.as_ref().prev.get().is_none(), "register: node already linked");
            debug_assert_eq!(node.as_ref().color.get(), 0, "register: node color must start at zero");
            list::push_front(self.white_ptr(), node);
            node.as_ref().color.set(self.white_color());
        }
    }

    /// Precondition assertions for entering `collect`: alive list empty,
    /// every white-list node colored `white_color`.
    pub(crate) fn assert_precollection_invariants(&self) {
        debug_assert!(list::is_empty(self.alive_ptr()), "collect: alive list must be empty on entry");
        #[cfg(debug_assertions)]
        {
            let white_color = self.white_color();
            let mut cur = unsafe { self.white_sentinel.next.get() }.unwrap();
            let end = self.white_ptr();
            while cur != end {
                let color = unsafe { cur.as_ref().color.get() };
                debug_assert_eq!(color, white_color, "collect: white-list node miscolored on entry");
                cur = unsafe { cur.as_ref().next.get() }.unwrap();
            }
        }
    }

    /// The `alive_cb` passed to the host's scan function. No-op unless
    /// `node` is currently white.
    pub(crate) fn mark_alive(&self, node: NonNull<GcNode>) {
        let color = unsafe { node.as_ref().color.get() };
        if color != self.white_color() {
            // Already grey or black: discovered earlier in this cycle.
            return;
        }
        unsafe {
            list::remove(node);
            list::push_front(self.alive_ptr(), node);
            node.as_ref().color.set(GREY);
        }
    }

    /// Drains the grey frontier from the tail of the alive
    /// list, invoking `scan` on each grey node after painting it black.
    /// `scan` may push new grey nodes to the head via further
    /// `mark_alive` calls; the tail-to-head walk guarantees they are
    /// visited before the cursor reaches the sentinel.
    pub(crate) fn drain_grey_frontier(&self, mut scan: impl FnMut(NonNull<GcNode>)) {
        let black = black_color(self.white_color());
        let sentinel = self.alive_ptr();
        let mut cur = unsafe { self.alive_sentinel.prev.get() }.unwrap();
        while cur != sentinel {
            let node_ref = unsafe { cur.as_ref() };
            debug_assert_eq!(node_ref.color.get(), GREY, "mark: expected grey node in alive list");
            node_ref.color.set(black);
            scan(cur);
            // Read `prev` only after `scan`: a node pushed to the head
            // during this call can land immediately before `cur`,
            // changing what `cur.prev` points to.
            cur = node_ref.prev.get().unwrap();
        }
    }

    /// Walks the white list head to tail, invoking `dead`
    /// on each node after advancing the cursor past it (the dead
    /// callback may destroy the containing object).
    pub(crate) fn report_dead(&self, mut dead: impl FnMut(NonNull<GcNode>)) {
        let sentinel = self.white_ptr();
        let mut cur = unsafe { self.white_sentinel.next.get() }.unwrap();
        while cur != sentinel {
            let next = unsafe { cur.as_ref().next.get() }.unwrap();
            dead(cur);
            cur = next;
        }
    }

    /// Splices the alive list onto the (now-emptied)
    /// white list in O(1), then flips `white_color` so every survivor's
    /// existing black-colored byte is already the new white.
    pub(crate) fn promote_survivors_and_flip(&self) {
        let white = self.white_ptr();
        let alive = self.alive_ptr();

        unsafe {
            if !list::is_empty(alive) {
                let first = self.alive_sentinel.next.get().unwrap();
                let last = self.alive_sentinel.prev.get().unwrap();
                self.white_sentinel.next.set(Some(first));
                self.white_sentinel.prev.set(Some(last));
                first.as_ref().prev.set(Some(white));
                last.as_ref().next.set(Some(white));
                self.alive_sentinel.next.set(Some(alive));
                self.alive_sentinel.prev.set(Some(alive));
            } else {
                self.white_sentinel.next.set(Some(white));
                self.white_sentinel.prev.set(Some(white));
            }
        }

        self.white_color.set(flip(self.white_color()));
    }

    #[cfg(feature = "stats")]
    pub(crate) fn white_count(&self) -> usize {
        Self::count(self.white_ptr())
    }

    #[cfg(feature = "stats")]
    pub(crate) fn alive_count(&self) -> usize {
        Self::count(self.alive_ptr())
    }

    #[cfg(feature = "stats")]
    fn count(sentinel: NonNull<GcNode>) -> usize {
        let mut n = 0;
        let mut cur = unsafe { sentinel.as_ref().next.get() }.unwrap();
        while cur != sentinel {
            n += 1;
            cur = unsafe { cur.as_ref().next.get() }.unwrap();
        }
        n
    }
}
