//! Matmul: the archetypal "special" op, not reducible to the generic walkers.

use crate::Element;
use crate::kernel::descriptor::MatmulOp;

/// Runs a rank-2 matrix multiply: ordinary triple loop over `(i, j, k)`,
/// reading `a`/`b` transpose-aware.
pub(crate) fn run<T: Element>(op: MatmulOp<'_, T>) {
    let MatmulOp {
        a,
        a_shape,
        b,
        b_shape,
        dst,
        transpose_a,
        transpose_b,
    } = op;

    let (rows, inner) = if transpose_a {
        (a_shape[1], a_shape[0])
    } else {
        (a_shape[0], a_shape[1])
    };
    let cols = if transpose_b { b_shape[0] } else { b_shape[1] };

    let a_at = |i: usize, k: usize| -> T {
        if transpose_a {
            a[k * a_shape[1] + i]
        } else {
            a[i * a_shape[1] + k]
        }
    };
    let b_at = |k: usize, j: usize| -> T {
        if transpose_b {
            b[j * b_shape[1] + k]
        } else {
            b[k * b_shape[1] + j]
        }
    };

    for i in 0..rows {
        for j in 0..cols {
            let mut acc = T::zero();
            for k in 0..inner {
                acc = acc + a_at(i, k) * b_at(k, j);
            }
            dst[i * cols + j] = acc;
        }
    }
}
