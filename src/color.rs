//! Tri-color marking constants for the mark-and-sweep engine.
//!
//! This module encodes the color states used by the tri-color marking
//! algorithm:
//! - White: not yet proven reachable in the current cycle
//! - Grey: reachable, outgoing edges not yet scanned
//! - Black: reachable, outgoing edges scanned
//!
//! Unlike a typical three-variant enum, white and black are not fixed
//! values: which literal denotes "white" alternates every cycle so every
//! surviving node is already correctly colored white at the start of the
//! next cycle, without a repaint pass over survivors. Grey is the one
//! color whose meaning never changes.

/// Grey is always this value; white/black alternate between 0 and 1.
pub(crate) const GREY: u8 = 2;

/// Distinguishes sentinel nodes from real registered nodes in debug
/// assertions. Never a valid `white_color`, and never observed by host
/// code. Mirrors `littlegc.cpp`'s magic `100`/`101` sentinel markers.
pub(crate) const WHITE_SENTINEL_COLOR: u8 = 200;
pub(crate) const ALIVE_SENTINEL_COLOR: u8 = 201;

/// Returns the black value complementary to `white_color`.
#[inline]
pub(crate) fn black_color(white_color: u8) -> u8 {
    debug_assert!(white_color == 0 || white_color == 1);
    1 - white_color
}

/// Flips the white/black encoding for the next cycle.
#[inline]
pub(crate) fn flip(white_color: u8) -> u8 {
    black_color(white_color)
}
