//! The public façade: one method per named operation, each a few lines —
//! infer shape, allocate, build a descriptor, hand it to the kernel.

use alloc::vec::Vec;

use num_traits::NumCast;

use super::layout::{Layout, ReduceDims};
use super::{resolve_axis, Tensor};
use crate::element::Element;
use crate::error::{Error, TensorError};
use crate::kernel::descriptor::{MatmulOp, Op, SoftmaxOp};
use crate::kernel::dispatch::Kernel;
use crate::kernel::linalg::conv;
use crate::storage::Storage;

// ---------------------------------------------------------------------
// Elementwise binary (pairwise family)
// ---------------------------------------------------------------------

impl<T: Element> Tensor<T> {
    /// Elementwise sum, broadcasting.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a + b)
    }

    /// Elementwise difference, broadcasting.
    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a - b)
    }

    /// Elementwise product, broadcasting.
    pub fn mul(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a * b)
    }

    /// Elementwise quotient, broadcasting. Division by zero propagates
    /// `±inf`/`NaN` per IEEE-754 rather than raising.
    pub fn div(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a / b)
    }

    /// Elementwise maximum, broadcasting.
    pub fn max(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a.max(b))
    }

    /// Elementwise minimum, broadcasting.
    pub fn min(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a.min(b))
    }

    /// Elementwise `self.powf(other)`, broadcasting.
    pub fn pow(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| a.powf(b))
    }

    /// Elementwise equality, producing 0.0/1.0 (core has no bool dtype).
    pub fn eq(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| bool_to_element(a == b))
    }

    /// Elementwise inequality, producing 0.0/1.0.
    pub fn ne(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| bool_to_element(a != b))
    }

    /// Elementwise `self >= other`, producing 0.0/1.0.
    pub fn ge(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| bool_to_element(a >= b))
    }

    /// Elementwise `self > other`, producing 0.0/1.0.
    pub fn gt(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| bool_to_element(a > b))
    }

    /// Elementwise `self <= other`, producing 0.0/1.0.
    pub fn le(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| bool_to_element(a <= b))
    }

    /// Elementwise `self < other`, producing 0.0/1.0.
    pub fn lt(&self, other: &Self) -> Result<Self, Error> {
        self.pairwise(other, |a, b| bool_to_element(a < b))
    }

    /// Sums a non-empty slice of identically shaped tensors elementwise.
    ///
    /// Unlike [`add`](Tensor::add), this does not broadcast across the
    /// list: every tensor must share `tensors[0]`'s exact shape.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if `tensors` is empty, or any
    ///   tensor's shape differs from the first's.
    pub fn add_n(tensors: &[Self]) -> Result<Self, Error> {
        let (first, rest) = tensors
            .split_first()
            .ok_or_else(|| TensorError::InvalidShape("add_n requires a non-empty slice".into()))?;

        let mut acc = first.clone();
        for t in rest {
            if t.dimensions() != first.dimensions() {
                return Err(TensorError::InvalidShape(format!(
                    "add_n: shape {:?} does not match first operand's shape {:?}",
                    t.dimensions(),
                    first.dimensions()
                ))
                .into());
            }
            acc = acc.add(t)?;
        }
        Ok(acc)
    }
}

fn bool_to_element<T: Element>(value: bool) -> T {
    if value {
        T::one()
    } else {
        T::zero()
    }
}

// ---------------------------------------------------------------------
// Elementwise unary transforms
// ---------------------------------------------------------------------

impl<T: Element> Tensor<T> {
    /// Elementwise negation.
    pub fn neg(&self) -> Result<Self, Error> {
        self.transform(|x| -x)
    }

    /// Elementwise absolute value.
    pub fn abs(&self) -> Result<Self, Error> {
        self.transform(|x| x.abs())
    }

    /// Elementwise sign: -1, 0, or 1. Zero-preserving, unlike
    /// [`Float::signum`](num_traits::Float::signum), which treats `+0.0` as
    /// positive.
    pub fn sign(&self) -> Result<Self, Error> {
        self.transform(|x| {
            if x > T::zero() {
                T::one()
            } else if x < T::zero() {
                -T::one()
            } else {
                T::zero()
            }
        })
    }

    /// Elementwise sine.
    pub fn sin(&self) -> Result<Self, Error> {
        self.transform(|x| x.sin())
    }

    /// Elementwise cosine.
    pub fn cos(&self) -> Result<Self, Error> {
        self.transform(|x| x.cos())
    }

    /// Elementwise tangent.
    pub fn tan(&self) -> Result<Self, Error> {
        self.transform(|x| x.tan())
    }

    /// Elementwise arcsine.
    pub fn asin(&self) -> Result<Self, Error> {
        self.transform(|x| x.asin())
    }

    /// Elementwise arccosine.
    pub fn acos(&self) -> Result<Self, Error> {
        self.transform(|x| x.acos())
    }

    /// Elementwise arctangent.
    pub fn atan(&self) -> Result<Self, Error> {
        self.transform(|x| x.atan())
    }

    /// Elementwise hyperbolic sine.
    pub fn sinh(&self) -> Result<Self, Error> {
        self.transform(|x| x.sinh())
    }

    /// Elementwise hyperbolic cosine.
    pub fn cosh(&self) -> Result<Self, Error> {
        self.transform(|x| x.cosh())
    }

    /// Elementwise hyperbolic tangent.
    pub fn tanh(&self) -> Result<Self, Error> {
        self.transform(|x| x.tanh())
    }

    /// Elementwise inverse hyperbolic sine.
    pub fn asinh(&self) -> Result<Self, Error> {
        self.transform(|x| x.asinh())
    }

    /// Elementwise inverse hyperbolic cosine.
    pub fn acosh(&self) -> Result<Self, Error> {
        self.transform(|x| x.acosh())
    }

    /// Elementwise inverse hyperbolic tangent.
    pub fn atanh(&self) -> Result<Self, Error> {
        self.transform(|x| x.atanh())
    }

    /// Elementwise natural exponential.
    pub fn exp(&self) -> Result<Self, Error> {
        self.transform(|x| x.exp())
    }

    /// Elementwise natural logarithm. `log(0)` and `log` of a negative value
    /// propagate `-inf`/`NaN` rather than raising.
    pub fn log(&self) -> Result<Self, Error> {
        self.transform(|x| x.ln())
    }

    /// Elementwise base-2 logarithm.
    pub fn log2(&self) -> Result<Self, Error> {
        self.transform(|x| x.log2())
    }

    /// Elementwise square root. Negative inputs propagate `NaN`.
    pub fn sqrt(&self) -> Result<Self, Error> {
        self.transform(|x| x.sqrt())
    }

    /// Elementwise square.
    pub fn sqr(&self) -> Result<Self, Error> {
        self.transform(|x| x * x)
    }

    /// Elementwise reciprocal square root.
    pub fn rsqrt(&self) -> Result<Self, Error> {
        self.transform(|x| x.sqrt().recip())
    }

    /// Elementwise reciprocal.
    pub fn rcp(&self) -> Result<Self, Error> {
        self.transform(|x| x.recip())
    }

    /// Elementwise ceiling.
    pub fn ceil(&self) -> Result<Self, Error> {
        self.transform(|x| x.ceil())
    }

    /// Elementwise floor.
    pub fn floor(&self) -> Result<Self, Error> {
        self.transform(|x| x.floor())
    }

    /// Elementwise rounding to the nearest integer.
    pub fn round(&self) -> Result<Self, Error> {
        self.transform(|x| x.round())
    }

    /// Clamps every element to `[lo, hi]`.
    pub fn clamp(&self, lo: T, hi: T) -> Result<Self, Error> {
        let lo_t = Tensor::scalar(lo);
        let hi_t = Tensor::scalar(hi);
        self.pairwise(&lo_t, |x, l| if x < l { l } else { x })?
            .pairwise(&hi_t, |x, h| if x > h { h } else { x })
    }
}

// ---------------------------------------------------------------------
// Activations
// ---------------------------------------------------------------------

fn sigmoid_body<T: Element>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

fn gelu_body<T: Element>(x: T) -> T {
    let half: T = NumCast::from(0.5_f64).unwrap_or_else(T::one);
    let coeff: T = NumCast::from(core::f64::consts::FRAC_2_PI.sqrt()).unwrap_or_else(T::one);
    let cubic: T = NumCast::from(0.044715_f64).unwrap_or_else(T::one);
    half * x * (T::one() + (coeff * (x + cubic * x * x * x)).tanh())
}

impl<T: Element> Tensor<T> {
    /// Rectified linear unit: `max(x, 0)`.
    pub fn relu(&self) -> Result<Self, Error> {
        self.transform(|x| x.max(T::zero()))
    }

    /// Logistic sigmoid: `1 / (1 + exp(-x))`.
    pub fn sigmoid(&self) -> Result<Self, Error> {
        self.transform(sigmoid_body)
    }

    /// SiLU / swish: `x * sigmoid(x)`.
    pub fn silu(&self) -> Result<Self, Error> {
        self.transform(|x| x * sigmoid_body(x))
    }

    /// GELU, tanh approximation.
    pub fn gelu(&self) -> Result<Self, Error> {
        self.transform(gelu_body)
    }

    /// Softplus: `ln(1 + exp(x))`.
    pub fn softplus(&self) -> Result<Self, Error> {
        self.transform(|x| (x.exp() + T::one()).ln())
    }

    /// Leaky ReLU: `x` if `x >= 0`, else `alpha * x`.
    pub fn leaky_relu(&self, alpha: T) -> Result<Self, Error> {
        let alpha_t = Tensor::scalar(alpha);
        self.pairwise(&alpha_t, |x, a| if x < T::zero() { a * x } else { x })
    }

    /// Exponential linear unit: `x` if `x > 0`, else `alpha * (exp(x) - 1)`.
    pub fn elu(&self, alpha: T) -> Result<Self, Error> {
        let alpha_t = Tensor::scalar(alpha);
        self.pairwise(&alpha_t, |x, a| {
            if x > T::zero() {
                x
            } else {
                a * (x.exp() - T::one())
            }
        })
    }

    /// Scaled ELU with the fixed constants from the original paper.
    pub fn selu(&self) -> Result<Self, Error> {
        let alpha: T = NumCast::from(1.6732632423543772848170429916717_f64).unwrap_or_else(T::one);
        let lambda: T =
            NumCast::from(1.0507009873554804934193349852946_f64).unwrap_or_else(T::one);
        let lambda_t = Tensor::scalar(lambda);
        self.elu(alpha)?.pairwise(&lambda_t, |x, l| x * l)
    }

    /// Parametric ReLU: `x` if `x >= 0`, else `alpha * x`, with `alpha` a
    /// (broadcastable) per-element tensor rather than a scalar.
    pub fn prelu(&self, alpha: &Self) -> Result<Self, Error> {
        self.pairwise(alpha, |x, a| if x < T::zero() { a * x } else { x })
    }

    /// Softmax along `dim`: numerically stable (subtract the per-slice max
    /// before exponentiating), outputs along `dim` sum to 1.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidIndex`] if `dim` is out of range.
    pub fn softmax(&self, dim: i32) -> Result<Self, Error> {
        let dim = resolve_axis(dim, self.rank())?;
        let dst_layout = Layout::from_dimensions(self.dimensions())?;
        let dst = Storage::zeroed(dst_layout.size());

        {
            let src = self.storage.borrow();
            let mut d = dst.borrow_mut();
            Kernel::global().exec(Op::Softmax(SoftmaxOp {
                src: &src,
                shape: self.dimensions(),
                strides: self.strides(),
                dst: &mut d,
                dst_strides: dst_layout.strides(),
                dim,
            }));
        }

        Ok(Self {
            storage: dst,
            layout: dst_layout,
        })
    }

    /// Gradient of combined softmax + cross-entropy loss with respect to
    /// `self` (the logits): `softmax(self, dim) - targets`.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if `targets`' shape isn't
    ///   broadcast-compatible with `self`'s.
    /// - [`TensorError::InvalidIndex`] if `dim` is out of range.
    pub fn softmax_cross_entropy_grad(&self, targets: &Self, dim: i32) -> Result<Self, Error> {
        self.softmax(dim)?.sub(targets)
    }
}

// ---------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------

impl<T: Element> Tensor<T> {
    /// Sums `self` along `dims`.
    pub fn reduce_sum(&self, dims: impl Into<ReduceDims>, keep_dims: bool) -> Result<Self, Error> {
        self.reduce(dims, keep_dims, |x| x, |a, b| a + b, T::zero(), None)
    }

    /// Averages `self` along `dims`.
    pub fn reduce_mean(&self, dims: impl Into<ReduceDims>, keep_dims: bool) -> Result<Self, Error> {
        self.reduce(
            dims,
            keep_dims,
            |x| x,
            |a, b| a + b,
            T::zero(),
            Some(|acc, n| acc / NumCast::from(n).unwrap_or_else(T::one)),
        )
    }

    /// Multiplies `self` along `dims`.
    pub fn reduce_prod(&self, dims: impl Into<ReduceDims>, keep_dims: bool) -> Result<Self, Error> {
        self.reduce(dims, keep_dims, |x| x, |a, b| a * b, T::one(), None)
    }

    /// Takes the minimum of `self` along `dims`.
    pub fn reduce_min(&self, dims: impl Into<ReduceDims>, keep_dims: bool) -> Result<Self, Error> {
        self.reduce(dims, keep_dims, |x| x, |a, b| a.min(b), T::infinity(), None)
    }

    /// Takes the maximum of `self` along `dims`.
    pub fn reduce_max(&self, dims: impl Into<ReduceDims>, keep_dims: bool) -> Result<Self, Error> {
        self.reduce(
            dims,
            keep_dims,
            |x| x,
            |a, b| a.max(b),
            T::neg_infinity(),
            None,
        )
    }
}

// ---------------------------------------------------------------------
// Index ops
// ---------------------------------------------------------------------

fn argmax_update<T: Element>(accum: T, accum_index: usize, value: T, index: usize) -> (T, usize) {
    if value > accum {
        (value, index)
    } else {
        (accum, accum_index)
    }
}

fn argmin_update<T: Element>(accum: T, accum_index: usize, value: T, index: usize) -> (T, usize) {
    if value < accum {
        (value, index)
    } else {
        (accum, accum_index)
    }
}

impl<T: Element> Tensor<T> {
    /// Index of the maximum value along `dim`. Ties resolve to the
    /// earliest index. The result holds indices as floats (the core has no
    /// integer dtype) and drops `dim` from its shape.
    pub fn argmax(&self, dim: i32) -> Result<Self, Error> {
        self.index_reduce(dim, argmax_update, T::neg_infinity())
    }

    /// Index of the minimum value along `dim`. Ties resolve to the
    /// earliest index.
    pub fn argmin(&self, dim: i32) -> Result<Self, Error> {
        self.index_reduce(dim, argmin_update, T::infinity())
    }
}

// ---------------------------------------------------------------------
// Shape composition
// ---------------------------------------------------------------------

impl<T: Element> Tensor<T> {
    /// Repeats `self`'s data along each axis by `reps[i]`, NumPy `tile`
    /// semantics: output shape is `self.dimensions()[i] * reps[i]`.
    ///
    /// Composed from `reshape` + broadcast-`add`-with-zero + `reshape`
    /// rather than a bespoke kernel.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if `reps.len()` doesn't match
    ///   `self.rank()`.
    pub fn tile(&self, reps: &[usize]) -> Result<Self, Error> {
        if reps.len() != self.rank() {
            return Err(TensorError::InvalidShape(format!(
                "tile: {} reps given for rank {}",
                reps.len(),
                self.rank()
            ))
            .into());
        }

        let mut interleaved_shape = Vec::with_capacity(self.rank() * 2);
        let mut target_shape = Vec::with_capacity(self.rank() * 2);
        let mut final_shape = Vec::with_capacity(self.rank());
        for (&size, &rep) in self.dimensions().iter().zip(reps) {
            interleaved_shape.push(1);
            interleaved_shape.push(size);
            target_shape.push(rep);
            target_shape.push(size);
            final_shape.push(rep * size);
        }

        let interleaved = self.reshape(&interleaved_shape)?;
        let zero = Tensor::constant(&target_shape, &[T::zero()])?;
        let broadcast = interleaved.pairwise(&zero, |x, z| x + z)?;
        broadcast.reshape(&final_shape)
    }
}

// ---------------------------------------------------------------------
// Matmul and convolution
// ---------------------------------------------------------------------

impl<T: Element> Tensor<T> {
    /// Matrix multiply: `self @ other`, with optional transpose of either
    /// operand. Both operands must be rank 2.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidRank`] if either operand isn't rank 2.
    /// - [`TensorError::InvalidShape`] if the inner dimensions disagree.
    pub fn matmul_with(&self, other: &Self, transpose_a: bool, transpose_b: bool) -> Result<Self, Error> {
        if self.rank() != 2 || other.rank() != 2 {
            return Err(TensorError::InvalidRank(format!(
                "matmul requires rank-2 operands, got ranks {} and {}",
                self.rank(),
                other.rank()
            ))
            .into());
        }

        let a_shape = [self.dimensions()[0], self.dimensions()[1]];
        let b_shape = [other.dimensions()[0], other.dimensions()[1]];

        let (rows, inner_a) = if transpose_a {
            (a_shape[1], a_shape[0])
        } else {
            (a_shape[0], a_shape[1])
        };
        let (inner_b, cols) = if transpose_b {
            (b_shape[1], b_shape[0])
        } else {
            (b_shape[0], b_shape[1])
        };

        if inner_a != inner_b {
            return Err(TensorError::InvalidShape(format!(
                "matmul: inner dimensions {inner_a} and {inner_b} disagree"
            ))
            .into());
        }

        let a_buf = self.to_vec();
        let b_buf = other.to_vec();
        let dst_layout = Layout::from_dimensions(&[rows, cols])?;
        let dst = Storage::zeroed(dst_layout.size());

        {
            let mut d = dst.borrow_mut();
            Kernel::global().exec(Op::Matmul(MatmulOp {
                a: &a_buf,
                a_shape,
                b: &b_buf,
                b_shape,
                dst: &mut d,
                transpose_a,
                transpose_b,
            }));
        }

        Ok(Self {
            storage: dst,
            layout: dst_layout,
        })
    }

    /// Matrix multiply with neither operand transposed.
    pub fn matmul(&self, other: &Self) -> Result<Self, Error> {
        self.matmul_with(other, false, false)
    }

    /// 2-D convolution with no padding: `self` is the image `[N, C, H, W]`,
    /// `kernel` is `[K, C, kH, kW]`; `stride` is `(height, width)`.
    /// Composed as `matmul(kernelReshaped, im2col(image))` followed by
    /// reshape and transpose to `[N, K, outH, outW]`.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidRank`] if either operand isn't rank 4.
    /// - [`TensorError::InvalidShape`] if the channel counts disagree.
    pub fn conv2d(&self, kernel: &Self, stride: (usize, usize)) -> Result<Self, Error> {
        if self.rank() != 4 {
            return Err(TensorError::InvalidRank(format!(
                "conv2d requires a rank-4 image, got rank {}",
                self.rank()
            ))
            .into());
        }
        if kernel.rank() != 4 {
            return Err(TensorError::InvalidRank(format!(
                "conv2d requires a rank-4 kernel, got rank {}",
                kernel.rank()
            ))
            .into());
        }

        let img = self.dimensions();
        let (n, c, h, w) = (img[0], img[1], img[2], img[3]);
        let k_shape = kernel.dimensions();
        let (k, kc, kh, kw) = (k_shape[0], k_shape[1], k_shape[2], k_shape[3]);

        if kc != c {
            return Err(TensorError::InvalidShape(format!(
                "conv2d: kernel channel count {kc} does not match image channel count {c}"
            ))
            .into());
        }

        let image_buf = self.to_vec();
        let kernel_buf = kernel.to_vec();
        let (col, [rows, cols]) = conv::im2col(&image_buf, [n, c, h, w], (kh, kw), stride);
        let out_h = conv::output_size(h, kh, stride.0);
        let out_w = conv::output_size(w, kw, stride.1);

        let mut raw = alloc::vec![T::zero(); k * cols];
        Kernel::global().exec(Op::Matmul(MatmulOp {
            a: &kernel_buf,
            a_shape: [k, rows],
            b: &col,
            b_shape: [rows, cols],
            dst: &mut raw,
            transpose_a: false,
            transpose_b: false,
        }));

        let result = Tensor::from_shape_slice(&[k, n, out_h, out_w], &raw)?;
        result.transpose(&[1, 0, 2, 3])?.copy()
    }
}
