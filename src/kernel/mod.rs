//! The execution kernel: dispatch, op descriptors, walkers, and linear algebra.
//!
//! - [`shape`] — broadcast/reduce-shape/offset utilities built on `Layout`.
//! - [`descriptor`] — the tagged [`descriptor::Op`]/[`descriptor::IndexOp`] records.
//! - [`dispatch`] — [`dispatch::Kernel`], the process-wide dispatcher.
//! - [`walker`] — the pairwise/transform/reduction/index families.
//! - [`linalg`] — matmul and the `im2col`/`col2im` convolution helpers.
//! - [`special`] — softmax, the other op not reducible to a generic walker.

pub(crate) mod descriptor;
pub(crate) mod dispatch;
pub(crate) mod linalg;
pub(crate) mod shape;
pub(crate) mod special;
pub(crate) mod walker;
