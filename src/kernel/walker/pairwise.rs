//! Pairwise walker: two broadcast operands, one destination.

use crate::Element;
use crate::kernel::descriptor::PairwiseOp;
use crate::kernel::walker::walk;

/// Runs a [`PairwiseOp`], dispatching to a rank-specialized loop.
pub(crate) fn run<T: Element>(op: PairwiseOp<'_, T>) {
    match op.dst_shape.len() {
        0 => run_rank0(op),
        1 => run_rank1(op),
        2 => run_rank2(op),
        _ => run_rankn(op),
    }
}

fn run_rank0<T: Element>(op: PairwiseOp<'_, T>) {
    op.dst[0] = (op.body)(op.a[0], op.b[0]);
}

fn run_rank1<T: Element>(op: PairwiseOp<'_, T>) {
    let n = op.dst_shape[0];
    let (mut pa, mut pb, mut pd) = (0usize, 0usize, 0usize);
    for _ in 0..n {
        op.dst[pd] = (op.body)(op.a[pa], op.b[pb]);
        pa += op.a_strides[0];
        pb += op.b_strides[0];
        pd += op.dst_strides[0];
    }
}

fn run_rank2<T: Element>(op: PairwiseOp<'_, T>) {
    let (rows, cols) = (op.dst_shape[0], op.dst_shape[1]);
    let (mut pa_row, mut pb_row, mut pd_row) = (0usize, 0usize, 0usize);

    for _ in 0..rows {
        let (mut pa, mut pb, mut pd) = (pa_row, pb_row, pd_row);
        for _ in 0..cols {
            op.dst[pd] = (op.body)(op.a[pa], op.b[pb]);
            pa += op.a_strides[1];
            pb += op.b_strides[1];
            pd += op.dst_strides[1];
        }
        pa_row += op.a_strides[0];
        pb_row += op.b_strides[0];
        pd_row += op.dst_strides[0];
    }
}

fn run_rankn<T: Element>(op: PairwiseOp<'_, T>) {
    let PairwiseOp {
        a,
        a_strides,
        b,
        b_strides,
        dst,
        dst_shape,
        dst_strides,
        body,
    } = op;

    walk(dst_shape, [a_strides, b_strides, dst_strides], |[pa, pb, pd]| {
        dst[pd] = body(a[pa], b[pb]);
    });
}
