//! Host callback contracts.
//!
//! The collector never discovers edges or reachability on its own: it is
//! driven entirely by host-supplied callbacks. This module defines their
//! shapes and the safety contract each one must uphold.

use std::ptr::NonNull;

use crate::node::GcNode;
use crate::Collector;

/// Emits the outgoing references of one object, or the root set.
///
/// Called by [`Collector::collect`] once per node that needs scanning,
/// plus once up front with `node == None` to seed the root set. For each
/// outgoing reference (or each root), the implementation must invoke
/// `alive_cb` exactly once per edge it wants to report — invoking it
/// more than once on the same target is harmless (the second and later
/// calls are no-ops), but is wasted work.
///
/// # Contract
///
/// Must be pure with respect to collector state: no registration, no
/// collection, no direct mutation of node links. Must be idempotent
/// under repeated invocation on the same input within one collection.
pub type ScanFn<H> = fn(&Collector<H>, Option<NonNull<GcNode>>, &mut dyn FnMut(NonNull<GcNode>));

/// Notifies the host that `node` is unreachable.
///
/// The host is responsible for destroying the containing object; after
/// this call returns the collector forgets the node entirely and never
/// touches it again. Must not call back into the collector.
pub type DeadFn<H> = fn(&Collector<H>, NonNull<GcNode>);

/// The callback the collector passes to [`ScanFn`] during the mark
/// phase, bound to a single scan call.
///
/// For a target node: if its color is white, the node is moved from the
/// white list to the alive list and painted grey. If its color is grey
/// or black, the call is a no-op — this is what makes emitting the same
/// edge more than once within one collection safe.
///
/// This is not a type hosts construct themselves; it is the
/// `&mut dyn FnMut(NonNull<GcNode>)` parameter [`ScanFn`] receives.
pub type AliveCb<'a> = dyn FnMut(NonNull<GcNode>) + 'a;
