//! The intrusive node embedded inside host-managed objects.
//!
//! `GcNode` is not owned by the collector: the host allocates and frees
//! the object that embeds it. The collector only rearranges `next`/`prev`
//! links and reads/writes the color byte.

use std::cell::Cell;
use std::ptr::NonNull;

use crate::color::{ALIVE_SENTINEL_COLOR, WHITE_SENTINEL_COLOR};

/// A fixed-size record embedded in each user-managed object.
///
/// `next`/`prev` link the node into exactly one list at any time (white,
/// alive, or unlinked). Both are `None` if and only if the node is
/// unlinked. `color` holds one of: the current `white_color`, its
/// complementary black value, or the grey constant.
pub struct GcNode {
    pub(crate) next: Cell<Option<NonNull<GcNode>>>,
    pub(crate) prev: Cell<Option<NonNull<GcNode>>>,
    pub(crate) color: Cell<u8>,
}

impl GcNode {
    /// Constructs a freshly unlinked node with color zero, ready to be
    /// passed to [`Collector::register`](crate::Collector::register).
    pub fn new() -> Self {
        Self {
            next: Cell::new(None),
            prev: Cell::new(None),
            color: Cell::new(0),
        }
    }

    /// True if the node is currently linked into a list.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.get().is_some()
    }

    pub(crate) fn new_sentinel(color: u8) -> Box<GcNode> {
        debug_assert!(color == WHITE_SENTINEL_COLOR || color == ALIVE_SENTINEL_COLOR);
        let node = Box::new(GcNode {
            next: Cell::new(None),
            prev: Cell::new(None),
            color: Cell::new(color),
        });
        let ptr = NonNull::from(node.as_ref());
        node.next.set(Some(ptr));
        node.prev.set(Some(ptr));
        node
    }

    /// Recovers a reference to the containing object `T` from a node
    /// known to be embedded at byte offset `field_offset` within `T`.
    ///
    /// This is the standard "subtract field offset" idiom: the collector
    /// never interprets bytes outside the node, and recovery is entirely
    /// the host's responsibility, but this helper spares hosts from
    /// hand-rolling the pointer arithmetic. Prefer
    /// `std::mem::offset_of!(HostType, node_field)` for `field_offset`.
    ///
    /// # Safety
    ///
    /// `self` must actually be the `node_field` of a live `T` at that
    /// offset. Passing a mismatched type or offset is undefined
    /// behavior.
    #[inline]
    pub unsafe fn container<T>(&self, field_offset: usize) -> &T {
        unsafe { &*(self as *const Self).byte_sub(field_offset).cast::<T>() }
    }
}

impl Default for GcNode {
    fn default() -> Self {
        Self::new()
    }
}
