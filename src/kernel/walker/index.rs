//! Index-reduction and index-set walkers: `execAtDim` entry points.

use num_traits::{NumCast, ToPrimitive};

use crate::Element;
use crate::kernel::descriptor::{IndexReduceOp, ScatterOp};
use crate::kernel::walker::walk;

/// Reduces `op.src` along `dim`, writing the winning index (as a float) into
/// `op.dst`. Recurses over every axis but `dim`; at each such multi-index it
/// scans `dim`, threading `(accum, accum_index)` through `op.update`.
pub(crate) fn reduce<T: Element>(op: IndexReduceOp<'_, T>, dim: usize) {
    let IndexReduceOp {
        src,
        src_shape,
        src_strides,
        dst,
        dst_strides,
        update,
        initial,
    } = op;

    visit(0, src_shape.len(), dim, src_shape, src_strides, dst_strides, 0, 0, src, dst, update, initial);
}

#[allow(clippy::too_many_arguments)]
fn visit<T: Element>(
    axis: usize,
    rank: usize,
    dim: usize,
    shape: &[usize],
    src_strides: &[usize],
    dst_strides: &[usize],
    ps: usize,
    pd: usize,
    src: &[T],
    dst: &mut [T],
    update: fn(T, usize, T, usize) -> (T, usize),
    initial: T,
) {
    if axis == rank {
        let mut accum = initial;
        let mut accum_index = 0usize;
        let mut p = ps;
        for i in 0..shape[dim] {
            let (a, ai) = update(accum, accum_index, src[p], i);
            accum = a;
            accum_index = ai;
            p += src_strides[dim];
        }
        dst[pd] = NumCast::from(accum_index).unwrap_or_else(T::zero);
        return;
    }

    if axis == dim {
        visit(
            axis + 1,
            rank,
            dim,
            shape,
            src_strides,
            dst_strides,
            ps,
            pd,
            src,
            dst,
            update,
            initial,
        );
        return;
    }

    for i in 0..shape[axis] {
        visit(
            axis + 1,
            rank,
            dim,
            shape,
            src_strides,
            dst_strides,
            ps + i * src_strides[axis],
            pd + i * dst_strides[axis],
            src,
            &mut *dst,
            update,
            initial,
        );
    }
}

/// Writes each `op.src` value into the `op.dst` position named by
/// `op.indices` along `dim`: `dst[..., indices[idx], ...] = src[idx]` with
/// every coordinate but `dim` carried over unchanged.
pub(crate) fn scatter<T: Element>(op: ScatterOp<'_, T>, dim: usize) {
    let ScatterOp {
        src,
        src_shape,
        src_strides,
        indices,
        indices_strides,
        dst,
        dst_shape: _,
        dst_strides,
    } = op;

    let dim_stride = dst_strides[dim];
    let mut dst_strides_masked = dst_strides.to_vec();
    dst_strides_masked[dim] = 0;

    walk(
        src_shape,
        [src_strides, indices_strides, &dst_strides_masked],
        |[ps, pidx, pd_base]| {
            let target = indices[pidx].to_usize().unwrap_or(0);
            dst[pd_base + target * dim_stride] = src[ps];
        },
    );
}
