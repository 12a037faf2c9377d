//! Reduction walker: sweep the input shape, accumulate into a masked
//! destination, optionally post-process.

use crate::Element;
use crate::kernel::descriptor::ReductionOp;
use crate::kernel::walker::walk;

/// Runs a [`ReductionOp`], dispatching to a rank-specialized sweep.
pub(crate) fn run<T: Element>(op: ReductionOp<'_, T>) {
    let ReductionOp {
        src,
        src_shape,
        src_strides,
        dst,
        dst_strides,
        reduced_mask: _,
        body,
        update,
        initial,
        post,
    } = op;

    for cell in dst.iter_mut() {
        *cell = initial;
    }

    match src_shape.len() {
        0 => run_rank0(src, dst, body, update),
        1 => run_rank1(src, src_shape, src_strides, dst, dst_strides, body, update),
        2 => run_rank2(src, src_shape, src_strides, dst, dst_strides, body, update),
        _ => run_rankn(src, src_shape, src_strides, dst, dst_strides, body, update),
    }

    if let Some((finalize, n)) = post {
        for cell in dst.iter_mut() {
            *cell = finalize(*cell, n);
        }
    }
}

fn run_rank0<T: Element>(
    src: &[T],
    dst: &mut [T],
    body: fn(T) -> T,
    update: fn(T, T) -> T,
) {
    dst[0] = update(dst[0], body(src[0]));
}

#[allow(clippy::too_many_arguments)]
fn run_rank1<T: Element>(
    src: &[T],
    src_shape: &[usize],
    src_strides: &[usize],
    dst: &mut [T],
    dst_strides: &[usize],
    body: fn(T) -> T,
    update: fn(T, T) -> T,
) {
    let n = src_shape[0];
    let (mut ps, mut pd) = (0usize, 0usize);
    for _ in 0..n {
        let value = body(src[ps]);
        dst[pd] = update(dst[pd], value);
        ps += src_strides[0];
        pd += dst_strides[0];
    }
}

#[allow(clippy::too_many_arguments)]
fn run_rank2<T: Element>(
    src: &[T],
    src_shape: &[usize],
    src_strides: &[usize],
    dst: &mut [T],
    dst_strides: &[usize],
    body: fn(T) -> T,
    update: fn(T, T) -> T,
) {
    let (rows, cols) = (src_shape[0], src_shape[1]);
    let (mut ps_row, mut pd_row) = (0usize, 0usize);

    for _ in 0..rows {
        let (mut ps, mut pd) = (ps_row, pd_row);
        for _ in 0..cols {
            let value = body(src[ps]);
            dst[pd] = update(dst[pd], value);
            ps += src_strides[1];
            pd += dst_strides[1];
        }
        ps_row += src_strides[0];
        pd_row += dst_strides[0];
    }
}

#[allow(clippy::too_many_arguments)]
fn run_rankn<T: Element>(
    src: &[T],
    src_shape: &[usize],
    src_strides: &[usize],
    dst: &mut [T],
    dst_strides: &[usize],
    body: fn(T) -> T,
    update: fn(T, T) -> T,
) {
    walk(src_shape, [src_strides, dst_strides], |[ps, pd]| {
        let value = body(src[ps]);
        dst[pd] = update(dst[pd], value);
    });
}
