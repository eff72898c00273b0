//! embergc - a small, embeddable tracing mark-and-sweep garbage collector
//!
//! This library tracks a set of host-registered objects and, on demand,
//! determines which are reachable from a host-supplied root set, then
//! notifies the host of the rest. It does not allocate or free user
//! memory, represent references between user objects, or manage root
//! policy — those stay the host's job.
//!
//! # Model
//!
//! The host embeds a [`GcNode`] inside each object it wants tracked,
//! registers it with [`Collector::register`], and implements two
//! callbacks: a scan callback that emits outgoing edges (or the root
//! set, when asked about `None`), and a dead callback invoked once per
//! object the collector proves unreachable.
//!
//! # Example
//!
//! ```
//! use embergc::{Collector, GcNode};
//! use std::cell::RefCell;
//! use std::ptr::NonNull;
//!
//! struct Object {
//!     node: GcNode,
//!     children: Vec<NonNull<GcNode>>,
//! }
//!
//! struct Host {
//!     roots: RefCell<Vec<NonNull<GcNode>>>,
//! }
//!
//! fn scan(gc: &Collector<Host>, obj: Option<NonNull<GcNode>>, alive: &mut dyn FnMut(NonNull<GcNode>)) {
//!     match obj {
//!         None => {
//!             for &root in gc.userdata().roots.borrow().iter() {
//!                 alive(root);
//!             }
//!         }
//!         Some(node) => {
//!             let object: &Object = unsafe { node.as_ref().container(std::mem::offset_of!(Object, node)) };
//!             for &child in &object.children {
//!                 alive(child);
//!             }
//!         }
//!     }
//! }
//!
//! fn dead(_gc: &Collector<Host>, node: NonNull<GcNode>) {
//!     let object: *const Object = unsafe { node.as_ref().container(std::mem::offset_of!(Object, node)) };
//!     unsafe { drop(Box::from_raw(object as *mut Object)) };
//! }
//!
//! let gc = Collector::new(Host { roots: RefCell::new(Vec::new()) }, scan, dead);
//! let obj = Box::into_raw(Box::new(Object { node: GcNode::new(), children: Vec::new() }));
//! let node = unsafe { NonNull::from(&mut (*obj).node) };
//! unsafe { gc.register(node) };
//! gc.collect(); // obj is not a root: the dead callback frees it
//! ```

mod callback;
mod color;
mod gc;
mod list;
mod node;
mod registry;

pub use callback::{AliveCb, DeadFn, ScanFn};
pub use gc::Collector;
pub use node::GcNode;

#[cfg(feature = "stats")]
pub use gc::CollectorStats;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::ptr::NonNull;

    struct Host {
        root: Cell<Option<NonNull<GcNode>>>,
        dead_count: Cell<u32>,
    }

    fn scan(gc: &Collector<Host>, obj: Option<NonNull<GcNode>>, alive: &mut dyn FnMut(NonNull<GcNode>)) {
        if obj.is_none() {
            if let Some(root) = gc.userdata().root.get() {
                alive(root);
            }
        }
    }

    fn dead(gc: &Collector<Host>, _node: NonNull<GcNode>) {
        gc.userdata().dead_count.set(gc.userdata().dead_count.get() + 1);
    }

    #[test]
    fn no_roots_collects_everything() {
        let host = Host {
            root: Cell::new(None),
            dead_count: Cell::new(0),
        };
        let gc = Collector::new(host, scan, dead);
        let node = GcNode::new();
        let ptr = NonNull::from(&node);
        unsafe { gc.register(ptr) };
        gc.collect();
        assert_eq!(gc.userdata().dead_count.get(), 1);
    }

    #[test]
    fn rooted_node_survives() {
        let node = GcNode::new();
        let ptr = NonNull::from(&node);
        let host = Host {
            root: Cell::new(Some(ptr)),
            dead_count: Cell::new(0),
        };
        let gc = Collector::new(host, scan, dead);
        unsafe { gc.register(ptr) };
        gc.collect();
        assert_eq!(gc.userdata().dead_count.get(), 0);
    }
}
