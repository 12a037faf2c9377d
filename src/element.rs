//! Element trait for tensor scalar types.
//!
//! The [`Element`] trait defines the floating-point types that can be
//! stored in a [`Tensor`](crate::Tensor) and walked by the execution
//! kernel. Implemented for `f32` and `f64`.

use num_traits::Float;

/// Trait for tensor element types.
///
/// The core assumes a single floating-point element type (Non-goals: no
/// integer or complex dtypes), so `Element` is simply `Float` plus the
/// bounds the kernel needs to move values around cheaply.
pub trait Element: Float + Copy + Default + core::fmt::Debug + 'static {}

impl Element for f32 {}
impl Element for f64 {}
