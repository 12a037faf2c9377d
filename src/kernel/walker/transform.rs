//! Transform walker: one operand, one destination, no broadcasting.

use crate::Element;
use crate::kernel::descriptor::TransformOp;
use crate::kernel::walker::walk;

/// Runs a [`TransformOp`], dispatching to a rank-specialized loop.
pub(crate) fn run<T: Element>(op: TransformOp<'_, T>) {
    match op.shape.len() {
        0 => run_rank0(op),
        1 => run_rank1(op),
        2 => run_rank2(op),
        _ => run_rankn(op),
    }
}

fn run_rank0<T: Element>(op: TransformOp<'_, T>) {
    op.dst[0] = (op.body)(op.src[0]);
}

fn run_rank1<T: Element>(op: TransformOp<'_, T>) {
    let n = op.shape[0];
    let (mut ps, mut pd) = (0usize, 0usize);
    for _ in 0..n {
        op.dst[pd] = (op.body)(op.src[ps]);
        ps += op.src_strides[0];
        pd += op.dst_strides[0];
    }
}

fn run_rank2<T: Element>(op: TransformOp<'_, T>) {
    let (rows, cols) = (op.shape[0], op.shape[1]);
    let (mut ps_row, mut pd_row) = (0usize, 0usize);

    for _ in 0..rows {
        let (mut ps, mut pd) = (ps_row, pd_row);
        for _ in 0..cols {
            op.dst[pd] = (op.body)(op.src[ps]);
            ps += op.src_strides[1];
            pd += op.dst_strides[1];
        }
        ps_row += op.src_strides[0];
        pd_row += op.dst_strides[0];
    }
}

fn run_rankn<T: Element>(op: TransformOp<'_, T>) {
    let TransformOp {
        src,
        src_strides,
        dst,
        shape,
        dst_strides,
        body,
    } = op;

    walk(shape, [src_strides, dst_strides], |[ps, pd]| {
        dst[pd] = body(src[ps]);
    });
}
