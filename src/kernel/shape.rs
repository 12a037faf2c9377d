//! Shape utilities: broadcast, reduction shape, and offset arithmetic.
//!
//! Thin wrappers over [`Layout`], exposed at the kernel layer so the walkers
//! and the façade share a single vocabulary for these computations.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Error;
use crate::tensor::layout::{Layout, ReduceDims};

/// Computes the broadcast shape and per-operand strides for a set of layouts.
///
/// Returns `None` if the layouts are not broadcast-compatible.
#[allow(clippy::type_complexity)]
pub(crate) fn broadcast(layouts: &[&Layout]) -> Option<(Box<[usize]>, Vec<Box<[usize]>>)> {
    Layout::broadcast(layouts)
}

/// Left-pads `src` with 1s so its rank equals `target`'s rank.
#[allow(dead_code)]
pub(crate) fn broadcasted_shape(src: &[usize], target: &[usize]) -> Box<[usize]> {
    Layout::broadcasted_shape(src, target)
}

/// Resolves a reduction axis specification into a boolean mask over `rank` dimensions.
pub(crate) fn reduced_dims(rank: usize, dims: &ReduceDims) -> Result<Box<[bool]>, Error> {
    Layout::reduced_dims(rank, dims)
}

/// Computes the reduced output shape given a reduced-dims mask.
pub(crate) fn reduce_shape(shape: &[usize], mask: &[bool], keep_dims: bool) -> Box<[usize]> {
    Layout::reduce_shape(shape, mask, keep_dims)
}

/// Computes the linear offset of a multi-index under the given strides.
#[allow(dead_code)]
pub(crate) fn compute_offset(indices: &[usize], strides: &[usize]) -> usize {
    Layout::compute_offset(indices, strides)
}
