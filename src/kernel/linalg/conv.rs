//! `im2col`/`col2im`: unfold convolution into matrix multiplication.

use alloc::vec;
use alloc::vec::Vec;

use crate::Element;

/// Output spatial size for a convolution with no padding: `(in - kernel) / stride + 1`.
pub(crate) fn output_size(input: usize, kernel: usize, stride: usize) -> usize {
    (input - kernel) / stride + 1
}

/// Unfolds each `kernel`-sized patch of `image` (shape `[n, c, h, w]`) into a
/// column, producing a matrix of shape `[c * kh * kw, n * out_h * out_w]`.
pub(crate) fn im2col<T: Element>(
    image: &[T],
    shape: [usize; 4],
    kernel: (usize, usize),
    stride: (usize, usize),
) -> (Vec<T>, [usize; 2]) {
    let [n, c, h, w] = shape;
    let (kh, kw) = kernel;
    let (stride_h, stride_w) = stride;
    let out_h = output_size(h, kh, stride_h);
    let out_w = output_size(w, kw, stride_w);

    let rows = c * kh * kw;
    let cols = n * out_h * out_w;
    let mut out = vec![T::zero(); rows * cols];

    for ni in 0..n {
        for oh in 0..out_h {
            for ow in 0..out_w {
                let col = (ni * out_h + oh) * out_w + ow;
                for ci in 0..c {
                    for khi in 0..kh {
                        for kwi in 0..kw {
                            let row = (ci * kh + khi) * kw + kwi;
                            let ih = oh * stride_h + khi;
                            let iw = ow * stride_w + kwi;
                            let src = ((ni * c + ci) * h + ih) * w + iw;
                            out[row * cols + col] = image[src];
                        }
                    }
                }
            }
        }
    }

    (out, [rows, cols])
}

/// Adjoint of [`im2col`]: accumulates each column value back into its source
/// position in an image of the given shape, summing at overlaps.
pub(crate) fn col2im<T: Element>(
    col: &[T],
    image_shape: [usize; 4],
    kernel: (usize, usize),
    stride: (usize, usize),
) -> Vec<T> {
    let [n, c, h, w] = image_shape;
    let (kh, kw) = kernel;
    let (stride_h, stride_w) = stride;
    let out_h = output_size(h, kh, stride_h);
    let out_w = output_size(w, kw, stride_w);
    let cols = n * out_h * out_w;

    let mut image = vec![T::zero(); n * c * h * w];

    for ni in 0..n {
        for oh in 0..out_h {
            for ow in 0..out_w {
                let col_idx = (ni * out_h + oh) * out_w + ow;
                for ci in 0..c {
                    for khi in 0..kh {
                        for kwi in 0..kw {
                            let row = (ci * kh + khi) * kw + kwi;
                            let ih = oh * stride_h + khi;
                            let iw = ow * stride_w + kwi;
                            let dst = ((ni * c + ci) * h + ih) * w + iw;
                            image[dst] = image[dst] + col[row * cols + col_idx];
                        }
                    }
                }
            }
        }
    }

    image
}
