//! N-dimensional tensor with CPU-backed, reference-counted storage.

pub(crate) mod layout;
mod ops;

use alloc::format;
use alloc::vec::Vec;

use layout::{Layout, ReduceDims};

use crate::element::Element;
use crate::error::{Error, TensorError};
use crate::kernel::descriptor::{
    BinaryBody, Finalize, IndexOp, IndexReduceOp, IndexUpdate, Op, PairwiseOp, ReductionOp,
    ScatterOp, TransformOp, UnaryBody,
};
use crate::kernel::dispatch::Kernel;
use crate::kernel::{shape, walker};
use crate::storage::Storage;

/// N-dimensional tensor with CPU-backed, reference-counted storage.
///
/// Views created by [`reshape`](Tensor::reshape) (when the source is
/// contiguous) and [`transpose`](Tensor::transpose) share their buffer with
/// the tensor they were created from.
#[derive(Clone)]
pub struct Tensor<T: Element> {
    storage: Storage<T>,
    layout: Layout,
}

impl<T: Element> Tensor<T> {
    /// Creates a tensor with constant values.
    ///
    /// If `value` has length 1, that single value is broadcast to fill the
    /// entire tensor. Otherwise `value`'s length must equal the shape volume.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if `value` is empty, any dimension is
    ///   zero, or `value`'s length is neither 1 nor equal to the shape volume.
    pub fn constant(shape: &[usize], value: &[T]) -> Result<Self, Error> {
        if value.is_empty() {
            return Err(TensorError::InvalidShape("value must not be empty".into()).into());
        }

        let layout = Layout::from_dimensions(shape)?;
        let volume = layout.size();

        let data = match value.len() {
            1 => alloc::vec![value[0]; volume],
            n if n == volume => value.to_vec(),
            n => {
                return Err(TensorError::InvalidShape(format!(
                    "value length {n} must be 1 or equal to shape volume {volume}"
                ))
                .into());
            }
        };

        Ok(Self {
            storage: Storage::from_vec(data),
            layout,
        })
    }

    /// Creates a tensor from a shape and a data slice.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if any dimension is zero or the data
    ///   length doesn't match the shape volume.
    pub fn from_shape_slice(shape: &[usize], data: &[T]) -> Result<Self, Error> {
        Self::constant(shape, data)
    }

    /// Creates a 1-D tensor from a data slice.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if `data` is empty.
    pub fn from_slice(data: &[T]) -> Result<Self, Error> {
        Self::constant(&[data.len()], data)
    }

    /// Creates a rank-0 tensor holding a single value.
    pub(crate) fn scalar(value: T) -> Self {
        Self {
            storage: Storage::from_vec(alloc::vec![value]),
            layout: Layout::from_dimensions(&[]).expect("rank-0 layout is always valid"),
        }
    }

    /// Materializes this tensor into a new, contiguous, unshared copy.
    ///
    /// # Errors
    ///
    /// This operation cannot fail; the `Result` is kept for symmetry with
    /// the rest of the façade.
    pub fn copy(&self) -> Result<Self, Error> {
        self.transform(|x| x)
    }

    /// Returns the tensor's dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &[usize] {
        self.layout.dimensions()
    }

    /// Returns the tensor's strides, in elements.
    #[must_use]
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Returns the tensor's rank (number of dimensions).
    #[must_use]
    pub fn rank(&self) -> usize {
        self.dimensions().len()
    }

    /// Returns the tensor's length (product of its dimensions, 1 for scalars).
    #[must_use]
    pub fn length(&self) -> usize {
        self.layout.size()
    }

    /// Reads the tensor's data into a new, contiguous, row-major `Vec`.
    ///
    /// Respects the current view's strides, so a transposed tensor is
    /// returned in its transposed order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        let buf = self.storage.borrow();
        let mut out = Vec::with_capacity(self.length());
        walker::walk(self.dimensions(), [self.strides()], |[p]| out.push(buf[p]));
        out
    }

    /// Fills every element of this tensor (respecting its current view) with
    /// `value`, in place.
    pub fn fill(&self, value: T) {
        let mut buf = self.storage.borrow_mut();
        walker::walk(self.dimensions(), [self.strides()], |[p]| buf[p] = value);
    }

    /// In-place constant write, identical to [`fill`](Tensor::fill).
    pub fn set(&self, value: T) {
        self.fill(value);
    }

    /// Reshapes this tensor.
    ///
    /// Shares the buffer when the current view is already contiguous;
    /// otherwise materializes a contiguous copy first.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if the new shape's volume does not
    ///   match this tensor's length, or any new dimension is zero.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, Error> {
        let new_layout = self.layout.reshaped(shape)?;

        if self.layout.is_contiguous() {
            Ok(Self {
                storage: self.storage.clone(),
                layout: new_layout,
            })
        } else {
            let copied = self.copy()?;
            Ok(Self {
                storage: copied.storage,
                layout: new_layout,
            })
        }
    }

    /// Transposes this tensor according to `perm`, a permutation of
    /// `0..rank`. The result is a view sharing this tensor's buffer.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidRank`] if `perm` is not a valid permutation of
    ///   `0..rank`.
    pub fn transpose(&self, perm: &[usize]) -> Result<Self, Error> {
        Ok(Self {
            storage: self.storage.clone(),
            layout: self.layout.transposed(perm)?,
        })
    }

    /// Runs a transform op: one operand, no broadcasting, same shape out.
    fn transform(&self, body: UnaryBody<T>) -> Result<Self, Error> {
        let dst_layout = Layout::from_dimensions(self.dimensions())?;
        let dst = Storage::zeroed(dst_layout.size());

        {
            let src = self.storage.borrow();
            let mut d = dst.borrow_mut();
            Kernel::global().exec(Op::Transform(TransformOp {
                src: &src,
                src_strides: self.strides(),
                dst: &mut d,
                shape: self.dimensions(),
                dst_strides: dst_layout.strides(),
                body,
            }));
        }

        Ok(Self {
            storage: dst,
            layout: dst_layout,
        })
    }

    /// Runs a pairwise op: two broadcast-compatible operands.
    fn pairwise(&self, other: &Self, body: BinaryBody<T>) -> Result<Self, Error> {
        let (dims, strides) =
            shape::broadcast(&[&self.layout, &other.layout]).ok_or_else(|| {
                TensorError::InvalidShape(format!(
                    "dimensions {:?} and {:?} are not broadcast-compatible",
                    self.dimensions(),
                    other.dimensions()
                ))
            })?;

        let dst_layout = Layout::from_dimensions(&dims)?;
        let dst = Storage::zeroed(dst_layout.size());

        {
            let a = self.storage.borrow();
            let b = other.storage.borrow();
            let mut d = dst.borrow_mut();
            Kernel::global().exec(Op::Pairwise(PairwiseOp {
                a: &a,
                a_strides: &strides[0],
                b: &b,
                b_strides: &strides[1],
                dst: &mut d,
                dst_shape: &dims,
                dst_strides: dst_layout.strides(),
                body,
            }));
        }

        Ok(Self {
            storage: dst,
            layout: dst_layout,
        })
    }

    /// Runs a reduction op along `dims`, per the reducer table entry named by
    /// `body`/`update`/`initial`/`post`.
    fn reduce(
        &self,
        dims: impl Into<ReduceDims>,
        keep_dims: bool,
        body: UnaryBody<T>,
        update: BinaryBody<T>,
        initial: T,
        post: Option<Finalize<T>>,
    ) -> Result<Self, Error> {
        let mask = shape::reduced_dims(self.rank(), &dims.into())?;
        let kept_shape = shape::reduce_shape(self.dimensions(), &mask, true);
        let kept_layout = Layout::from_dimensions(&kept_shape)?;

        let reduced_count: usize = self
            .dimensions()
            .iter()
            .zip(mask.iter())
            .filter(|(_, &reduced)| reduced)
            .map(|(&dim, _)| dim)
            .product();

        let dst_strides_masked: Vec<usize> = kept_layout
            .strides()
            .iter()
            .zip(mask.iter())
            .map(|(&stride, &reduced)| if reduced { 0 } else { stride })
            .collect();

        let dst = Storage::zeroed(kept_layout.size());

        {
            let src = self.storage.borrow();
            let mut d = dst.borrow_mut();
            Kernel::global().exec(Op::Reduction(ReductionOp {
                src: &src,
                src_shape: self.dimensions(),
                src_strides: self.strides(),
                dst: &mut d,
                dst_strides: &dst_strides_masked,
                reduced_mask: &mask,
                body,
                update,
                initial,
                post: post.map(|f| (f, reduced_count)),
            }));
        }

        let final_shape = if keep_dims {
            kept_shape
        } else {
            shape::reduce_shape(self.dimensions(), &mask, false)
        };
        let final_layout = kept_layout.reshaped(&final_shape)?;

        Ok(Self {
            storage: dst,
            layout: final_layout,
        })
    }

    /// Reduces along `dim`, keeping the winning value's index (argmax/argmin).
    /// The reduced axis is dropped from the result.
    fn index_reduce(&self, dim: i32, update: IndexUpdate<T>, initial: T) -> Result<Self, Error> {
        let dim = resolve_axis(dim, self.rank())?;
        let mask = {
            let mut m = alloc::vec![false; self.rank()];
            m[dim] = true;
            m
        };
        let kept_shape = shape::reduce_shape(self.dimensions(), &mask, true);
        let kept_layout = Layout::from_dimensions(&kept_shape)?;

        let dst_strides_masked: Vec<usize> = kept_layout
            .strides()
            .iter()
            .zip(mask.iter())
            .map(|(&stride, &reduced)| if reduced { 0 } else { stride })
            .collect();

        let dst = Storage::zeroed(kept_layout.size());

        {
            let src = self.storage.borrow();
            let mut d = dst.borrow_mut();
            Kernel::global().exec_at_dim(
                IndexOp::IndexReduce(IndexReduceOp {
                    src: &src,
                    src_shape: self.dimensions(),
                    src_strides: self.strides(),
                    dst: &mut d,
                    dst_strides: &dst_strides_masked,
                    update,
                    initial,
                }),
                dim,
            );
        }

        let final_shape = shape::reduce_shape(self.dimensions(), &mask, false);
        let final_layout = kept_layout.reshaped(&final_shape)?;

        Ok(Self {
            storage: dst,
            layout: final_layout,
        })
    }

    /// Scatters `self`'s values into a new tensor of `output_shape`, at the
    /// positions named by `indices` along `dim`.
    ///
    /// `indices` must share `self`'s shape: `indices[i]` gives the
    /// destination coordinate along `dim` for `self[i]`.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if `indices`'s shape doesn't match
    ///   `self`'s, or `output_shape`'s rank doesn't match `self`'s.
    /// - [`TensorError::InvalidIndex`] if `dim` is out of range.
    pub fn scatter(&self, indices: &Self, dim: i32, output_shape: &[usize]) -> Result<Self, Error> {
        if indices.dimensions() != self.dimensions() {
            return Err(TensorError::InvalidShape(format!(
                "indices shape {:?} must match source shape {:?}",
                indices.dimensions(),
                self.dimensions()
            ))
            .into());
        }
        if output_shape.len() != self.rank() {
            return Err(TensorError::InvalidShape(format!(
                "output rank {} must match source rank {}",
                output_shape.len(),
                self.rank()
            ))
            .into());
        }

        let dim = resolve_axis(dim, self.rank())?;
        let dst_layout = Layout::from_dimensions(output_shape)?;
        let dst = Storage::zeroed(dst_layout.size());

        {
            let src = self.storage.borrow();
            let idx = indices.storage.borrow();
            let mut d = dst.borrow_mut();
            Kernel::global().exec_at_dim(
                IndexOp::Scatter(ScatterOp {
                    src: &src,
                    src_shape: self.dimensions(),
                    src_strides: self.strides(),
                    indices: &idx,
                    indices_strides: indices.strides(),
                    dst: &mut d,
                    dst_shape: dst_layout.dimensions(),
                    dst_strides: dst_layout.strides(),
                }),
                dim,
            );
        }

        Ok(Self {
            storage: dst,
            layout: dst_layout,
        })
    }
}

/// Resolves a (possibly negative, end-relative) axis against `rank`.
pub(crate) fn resolve_axis(axis: i32, rank: usize) -> Result<usize, Error> {
    let resolved = if axis < 0 {
        axis + rank as i32
    } else {
        axis
    };

    if resolved < 0 || resolved as usize >= rank {
        return Err(TensorError::InvalidIndex(format!("axis {axis} out of range for rank {rank}")).into());
    }

    Ok(resolved as usize)
}
