//! The execution kernel: a process-wide dispatcher with no mutable state.
//!
//! [`Kernel`] holds nothing beyond its existence — it is safe to construct
//! and discard arbitrarily often, and [`Kernel::global`] hands out a shared
//! reference to the one process-wide instance. Swapping the dispatcher
//! (e.g. for a threaded or SIMD backend) is the seam the design is built
//! around; the façade never touches the walkers directly.

use crate::Element;
use crate::kernel::descriptor::{IndexOp, Op};
use crate::kernel::linalg::matmul;
use crate::kernel::special;
use crate::kernel::walker::{index, pairwise, reduction, transform};

/// The execution kernel. Zero-sized: dispatch is pure function selection.
pub(crate) struct Kernel;

static KERNEL: Kernel = Kernel;

impl Kernel {
    /// Returns the process-wide kernel instance.
    pub(crate) fn global() -> &'static Kernel {
        &KERNEL
    }

    /// Dispatches `op` by family. No dimension argument: used by pairwise,
    /// transform, reduction (axes are encoded in the descriptor), and the
    /// special ops (matmul, softmax).
    pub(crate) fn exec<T: Element>(&self, op: Op<'_, T>) {
        match op {
            Op::Pairwise(o) => pairwise::run(o),
            Op::Transform(o) => transform::run(o),
            Op::Reduction(o) => reduction::run(o),
            Op::Matmul(o) => matmul::run(o),
            Op::Softmax(o) => special::run(o),
        }
    }

    /// Dispatches an index-family `op` against the target dimension `dim`:
    /// used by index reductions (`argmax`/`argmin`) and index-set (`scatter`).
    pub(crate) fn exec_at_dim<T: Element>(&self, op: IndexOp<'_, T>, dim: usize) {
        match op {
            IndexOp::IndexReduce(o) => index::reduce(o, dim),
            IndexOp::Scatter(o) => index::scatter(o, dim),
        }
    }
}
