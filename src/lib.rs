//! A CPU tensor computation engine with NumPy-style broadcasting and
//! stride-based views.
//!
//! This library evaluates elementwise, reduction, indexing, matrix, and
//! convolution operations over multi-dimensional arrays of floating-point
//! numbers. Every operation — `add`, `sin`, `relu`, `reduce_sum`, `argmax`,
//! `softmax`, `matmul`, `conv2d` — is thin composition over a small,
//! rank-agnostic execution kernel that walks strided buffers.
//!
//! # Types
//!
//! - [`Tensor`] — N-dimensional array with CPU-backed, reference-counted
//!   storage; owns its shape/strides and the operation façade.
//! - [`Element`] — marker trait for the floating-point types a `Tensor` can
//!   hold (`f32`, `f64`).
//! - [`Error`] — error type for tensor operations.

#![warn(missing_docs)]

extern crate alloc;

pub mod error;

mod element;
mod kernel;
mod storage;
mod tensor;

pub use element::Element;
pub use error::Error;
pub use tensor::Tensor;
