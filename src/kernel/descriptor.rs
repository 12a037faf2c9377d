//! Op descriptors: tagged records the dispatcher matches on.
//!
//! Each variant borrows its operand/destination buffers for the duration of
//! one [`Kernel::exec`](crate::kernel::dispatch::Kernel::exec) or
//! [`Kernel::exec_at_dim`](crate::kernel::dispatch::Kernel::exec_at_dim) call
//! and carries the family-specific metadata the corresponding walker needs.
//! This replaces runtime type tests on a single op struct with a compile-time
//! exhaustive match.

use crate::Element;

/// Scalar transform body: one input value to one output value.
pub(crate) type UnaryBody<T> = fn(T) -> T;

/// Scalar pairwise/update body: two values combined into one.
pub(crate) type BinaryBody<T> = fn(T, T) -> T;

/// Reduction post-process: `(accumulator, reduced count) -> result`.
pub(crate) type Finalize<T> = fn(T, usize) -> T;

/// Index-reduction update: `(accum, accum_index, value, index) -> (accum, accum_index)`.
pub(crate) type IndexUpdate<T> = fn(T, usize, T, usize) -> (T, usize);

/// An op ready for dispatch through [`Kernel::exec`](crate::kernel::dispatch::Kernel::exec).
pub(crate) enum Op<'a, T: Element> {
    /// Two operands, one destination, broadcasting.
    Pairwise(PairwiseOp<'a, T>),
    /// One operand, one destination, no broadcasting.
    Transform(TransformOp<'a, T>),
    /// One operand, one destination, reduced along a dimension mask.
    Reduction(ReductionOp<'a, T>),
    /// Rank-2 matrix multiply.
    Matmul(MatmulOp<'a, T>),
    /// Softmax along one axis.
    Softmax(SoftmaxOp<'a, T>),
}

/// An op ready for dispatch through [`Kernel::exec_at_dim`](crate::kernel::dispatch::Kernel::exec_at_dim).
pub(crate) enum IndexOp<'a, T: Element> {
    /// Reduce along one axis, keeping the winning index (e.g. `argmax`).
    IndexReduce(IndexReduceOp<'a, T>),
    /// Scatter source values into destination positions named by an index tensor.
    Scatter(ScatterOp<'a, T>),
}

/// Two broadcast-compatible operands written into a destination of the
/// broadcast shape. `a_strides`/`b_strides`/`dst_strides` all have length
/// `dst_shape.len()`; broadcast dimensions carry stride 0.
pub(crate) struct PairwiseOp<'a, T: Element> {
    pub a: &'a [T],
    pub a_strides: &'a [usize],
    pub b: &'a [T],
    pub b_strides: &'a [usize],
    pub dst: &'a mut [T],
    pub dst_shape: &'a [usize],
    pub dst_strides: &'a [usize],
    pub body: BinaryBody<T>,
}

/// One operand, same shape as the destination, no broadcasting.
pub(crate) struct TransformOp<'a, T: Element> {
    pub src: &'a [T],
    pub src_strides: &'a [usize],
    pub dst: &'a mut [T],
    pub shape: &'a [usize],
    pub dst_strides: &'a [usize],
    pub body: UnaryBody<T>,
}

/// Reduce `src` along the axes marked in `reduced_mask`.
///
/// `dst_strides` has the same length as `src_shape` (one entry per *input*
/// axis) with the reduced axes set to stride 0, so every input element that
/// shares non-reduced coordinates maps to the same destination cell.
pub(crate) struct ReductionOp<'a, T: Element> {
    pub src: &'a [T],
    pub src_shape: &'a [usize],
    pub src_strides: &'a [usize],
    pub dst: &'a mut [T],
    pub dst_strides: &'a [usize],
    pub reduced_mask: &'a [bool],
    pub body: UnaryBody<T>,
    pub update: BinaryBody<T>,
    pub initial: T,
    /// `(finalize, reduced element count)`, applied to every destination
    /// cell after the sweep.
    pub post: Option<(Finalize<T>, usize)>,
}

/// Rank-2 matrix multiply; `a`/`b` are read `transpose_*`-aware.
pub(crate) struct MatmulOp<'a, T: Element> {
    pub a: &'a [T],
    pub a_shape: [usize; 2],
    pub b: &'a [T],
    pub b_shape: [usize; 2],
    pub dst: &'a mut [T],
    pub transpose_a: bool,
    pub transpose_b: bool,
}

/// Softmax along `dim` of a tensor of the given shape.
pub(crate) struct SoftmaxOp<'a, T: Element> {
    pub src: &'a [T],
    pub shape: &'a [usize],
    pub strides: &'a [usize],
    pub dst: &'a mut [T],
    pub dst_strides: &'a [usize],
    pub dim: usize,
}

/// Reduce along `dim`, keeping the winning value's index (argmax/argmin).
pub(crate) struct IndexReduceOp<'a, T: Element> {
    pub src: &'a [T],
    pub src_shape: &'a [usize],
    pub src_strides: &'a [usize],
    pub dst: &'a mut [T],
    pub dst_strides: &'a [usize],
    pub update: IndexUpdate<T>,
    pub initial: T,
}

/// Write `src[i]` into `dst` at the position named by `indices[i]` along `dim`.
pub(crate) struct ScatterOp<'a, T: Element> {
    pub src: &'a [T],
    pub src_shape: &'a [usize],
    pub src_strides: &'a [usize],
    pub indices: &'a [T],
    pub indices_strides: &'a [usize],
    pub dst: &'a mut [T],
    pub dst_shape: &'a [usize],
    pub dst_strides: &'a [usize],
}
