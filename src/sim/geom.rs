//! Wrap-aware geometry for the toroidal playfield
//!
//! Both screen axes wrap, so every distance is the shorter of the direct
//! separation and the path across the seam.

use glam::Vec2;

/// Wrap a coordinate into `[0, span)`.
#[inline]
pub fn wrap_coord(value: f32, span: f32) -> f32 {
    let wrapped = value.rem_euclid(span);
    // rem_euclid of a tiny negative can round up to exactly span
    if wrapped >= span { wrapped - span } else { wrapped }
}

/// Distance along one wrapping axis: the shorter of direct and around-the-seam.
///
/// Inputs are expected in `[0, span)`; the result never exceeds `span / 2`.
#[inline]
pub fn wrap_distance(a: f32, b: f32, span: f32) -> f32 {
    let direct = (a - b).abs();
    direct.min(span - direct)
}

/// True iff two circles overlap on the torus.
///
/// Strict inequality: circles that exactly touch do not overlap. Callers
/// must exclude self-pairs, which otherwise trivially overlap.
#[inline]
pub fn overlaps(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32, bounds: Vec2) -> bool {
    let dx = wrap_distance(a_pos.x, b_pos.x, bounds.x);
    let dy = wrap_distance(a_pos.y, b_pos.y, bounds.y);
    let reach = a_radius + b_radius;
    dx * dx + dy * dy < reach * reach
}
