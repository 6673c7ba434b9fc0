//! Dimension Rotation
//!
//! The cyclic permutation that reassigns which axes play which role. A
//! single forward rotation shifts every color axis one slot towards the
//! back of the vector, wrapping the last color axis around to the first
//! color slot; the two spatial slots are never touched by one call. The
//! permutation is applied uniformly to extent vectors, coordinates, and any
//! per-dimension scalar array so all derived state stays consistent.

/// Number of leading indices mapped to the screen (the spatial axes).
pub const SPATIAL_DIMS: usize = 2;

/// Cyclically shift the color sub-range `[2, len)` of `components` by one.
///
/// Forward moves the value at index `i` to index `i + 1` (wrapping inside
/// the sub-range); backward is the exact inverse. Works on any element
/// type, so it serves sizes, coordinates, and rendering scales alike.
pub fn rotate_components<T>(components: &mut [T], forward: bool) {
    if components.len() <= SPATIAL_DIMS {
        return;
    }
    let colors = &mut components[SPATIAL_DIMS..];
    if forward {
        colors.rotate_right(1);
    } else {
        colors.rotate_left(1);
    }
}

/// Where a dimension index lands under the same permutation.
///
/// A motion intent along dimension `dim` keeps pointing at the same
/// physical axis only if its index is remapped exactly like the
/// component that used to live there. Spatial indices map to themselves.
pub fn rotate_dim_index(dim: usize, ndim: usize, forward: bool) -> usize {
    debug_assert!(dim < ndim);
    if dim < SPATIAL_DIMS {
        return dim;
    }
    let span = ndim - SPATIAL_DIMS;
    let offset = dim - SPATIAL_DIMS;
    let moved = if forward {
        (offset + 1) % span
    } else {
        (offset + span - 1) % span
    };
    SPATIAL_DIMS + moved
}
