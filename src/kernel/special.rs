//! Softmax: the second "special" op, alongside matmul.

use crate::Element;
use crate::kernel::descriptor::SoftmaxOp;
use crate::kernel::walker::walk;

/// Runs a numerically stable softmax along `op.dim`: subtract the per-slice
/// max, exponentiate, normalize by the per-slice sum.
pub(crate) fn run<T: Element>(op: SoftmaxOp<'_, T>) {
    let SoftmaxOp {
        src,
        shape,
        strides,
        dst,
        dst_strides,
        dim,
    } = op;

    let n = shape[dim];
    let src_dim_stride = strides[dim];
    let dst_dim_stride = dst_strides[dim];

    let mut outer_strides_src = strides.to_vec();
    outer_strides_src[dim] = 0;
    let mut outer_strides_dst = dst_strides.to_vec();
    outer_strides_dst[dim] = 0;

    walk(shape, [&outer_strides_src, &outer_strides_dst], |[ps, pd]| {
        let mut max = T::neg_infinity();
        let mut p = ps;
        for _ in 0..n {
            if src[p] > max {
                max = src[p];
            }
            p += src_dim_stride;
        }

        let mut sum = T::zero();
        let mut p = ps;
        let mut q = pd;
        for _ in 0..n {
            let e = (src[p] - max).exp();
            dst[q] = e;
            sum = sum + e;
            p += src_dim_stride;
            q += dst_dim_stride;
        }

        let mut q = pd;
        for _ in 0..n {
            dst[q] = dst[q] / sum;
            q += dst_dim_stride;
        }
    });
}
