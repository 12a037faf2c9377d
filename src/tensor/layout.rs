//! Tensor memory layout with dimensions, strides, and offset.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::Error;
use crate::error::TensorError;

/// Tensor memory layout descriptor.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    dimensions: Box<[usize]>,
    strides: Box<[usize]>,
    offset: usize,
}

impl Layout {
    /// Creates a new contiguous layout from dimensions.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if any dimension is zero.
    pub(crate) fn from_dimensions(dimensions: &[usize]) -> Result<Self, Error> {
        if dimensions.contains(&0) {
            return Err(TensorError::InvalidShape("dimensions must be non-zero".into()).into());
        }

        Ok(Self {
            dimensions: dimensions.into(),
            strides: Self::compute_strides(dimensions),
            offset: 0,
        })
    }

    /// Returns the dimensions as a slice.
    pub(crate) fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    /// Returns the strides as a slice.
    #[allow(dead_code)]
    pub(crate) fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the memory offset.
    #[allow(dead_code)]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the total number of elements.
    ///
    /// Returns 1 for scalars.
    pub(crate) fn size(&self) -> usize {
        self.dimensions.iter().product::<usize>().max(1)
    }

    /// Computes broadcast dimensions and strides for multiple layouts.
    ///
    /// Returns output dimensions and strides for each input layout,
    /// or `None` if layouts are not broadcast-compatible.
    #[allow(clippy::type_complexity)]
    pub(crate) fn broadcast(layouts: &[&Layout]) -> Option<(Box<[usize]>, Vec<Box<[usize]>>)> {
        if layouts.is_empty() {
            return Some((Box::new([]), Vec::new()));
        }

        if layouts.len() == 1 {
            return Some((
                layouts[0].dimensions.clone(),
                vec![layouts[0].strides.clone()],
            ));
        }

        let mut out_dims = layouts[0].dimensions.clone();
        for layout in &layouts[1..] {
            out_dims = Self::broadcast_dimensions(&out_dims, &layout.dimensions)?;
        }

        let strides = layouts
            .iter()
            .map(|l| l.broadcast_strides(&out_dims))
            .collect();

        Some((out_dims, strides))
    }

    /// Computes broadcast dimensions for two dimension slices.
    fn broadcast_dimensions(a: &[usize], b: &[usize]) -> Option<Box<[usize]>> {
        let mut result: Vec<usize> = a
            .iter()
            .rev()
            .copied()
            .chain(core::iter::repeat(1))
            .zip(b.iter().rev().copied().chain(core::iter::repeat(1)))
            .take(a.len().max(b.len()))
            .map(|(a, b)| match (a, b) {
                (a, b) if a == b => Some(a),
                (1, b) => Some(b),
                (a, 1) => Some(a),
                _ => None,
            })
            .collect::<Option<_>>()?;

        result.reverse();

        Some(result.into_boxed_slice())
    }

    /// Left-pads `src` with 1s so its rank equals `target`'s rank.
    ///
    /// This is the shape-only half of broadcasting: it does not check that
    /// `src` and `target` are actually compatible, it only aligns ranks so
    /// dimension-by-dimension comparison (or [`broadcast_strides`] below)
    /// can proceed right-aligned.
    ///
    /// [`broadcast_strides`]: Layout::broadcast_strides
    pub(crate) fn broadcasted_shape(src: &[usize], target: &[usize]) -> Box<[usize]> {
        core::iter::repeat_n(1, target.len().saturating_sub(src.len()))
            .chain(src.iter().copied())
            .collect()
    }

    /// Computes strides for broadcasting this layout to target shape.
    ///
    /// Broadcast dimensions have stride 0.
    fn broadcast_strides(&self, target: &[usize]) -> Box<[usize]> {
        let dimensions = &self.dimensions;
        let strides = &self.strides;

        let mut result: Vec<usize> =
            core::iter::repeat_n(0, target.len().saturating_sub(dimensions.len()))
                .chain(
                    dimensions
                        .iter()
                        .zip(strides)
                        .zip(
                            target
                                .iter()
                                .skip(target.len().saturating_sub(dimensions.len())),
                        )
                        .map(|((&dim, &stride), &t)| if dim == t { stride } else { 0 }),
                )
                .collect();

        if result.len() < target.len() {
            result.resize(target.len(), 0);
        }

        result.into_boxed_slice()
    }

    /// Computes row-major (C-contiguous) strides for the given dimensions.
    fn compute_strides(dimensions: &[usize]) -> Box<[usize]> {
        let mut strides = vec![1; dimensions.len()];
        for i in (0..dimensions.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * dimensions[i + 1];
        }
        strides.into_boxed_slice()
    }

    /// Resolves a reduction axis specification into a boolean mask over `rank` dimensions.
    ///
    /// `dims` entries are resolved modulo `rank` (negative indexes from the end).
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidIndex`] if an axis is out of range or repeated.
    pub(crate) fn reduced_dims(rank: usize, dims: &ReduceDims) -> Result<Box<[bool]>, Error> {
        let mut mask = vec![false; rank];

        let axes: Vec<isize> = match dims {
            ReduceDims::All => return Ok(vec![true; rank].into_boxed_slice()),
            ReduceDims::Axes(axes) => axes.clone(),
        };

        for axis in axes {
            let resolved = if axis < 0 { axis + rank as isize } else { axis };

            if resolved < 0 || resolved as usize >= rank {
                return Err(TensorError::InvalidIndex(format!(
                    "axis {axis} out of range for rank {rank}"
                ))
                .into());
            }

            let resolved = resolved as usize;
            if mask[resolved] {
                return Err(TensorError::InvalidIndex(format!(
                    "axis {axis} specified more than once"
                ))
                .into());
            }
            mask[resolved] = true;
        }

        Ok(mask.into_boxed_slice())
    }

    /// Computes the reduced output shape given a reduced-dims mask.
    ///
    /// Reduced dimensions become 1 when `keep_dims`, else are removed. A shape
    /// with every dimension reduced and `keep_dims = false` collapses to rank 0.
    pub(crate) fn reduce_shape(shape: &[usize], mask: &[bool], keep_dims: bool) -> Box<[usize]> {
        if keep_dims {
            shape
                .iter()
                .zip(mask)
                .map(|(&dim, &reduced)| if reduced { 1 } else { dim })
                .collect()
        } else {
            shape
                .iter()
                .zip(mask)
                .filter(|(_, &reduced)| !reduced)
                .map(|(&dim, _)| dim)
                .collect()
        }
    }

    /// Computes the linear offset of a multi-index under the given strides.
    pub(crate) fn compute_offset(indices: &[usize], strides: &[usize]) -> usize {
        indices.iter().zip(strides).map(|(&i, &s)| i * s).sum()
    }

    /// Permutes dimensions and strides according to `perm`.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidRank`] if `perm` is not a permutation of
    ///   `0..rank`.
    pub(crate) fn transposed(&self, perm: &[usize]) -> Result<Self, Error> {
        let rank = self.dimensions.len();

        if perm.len() != rank {
            return Err(TensorError::InvalidRank(format!(
                "transpose permutation length {} must equal rank {rank}",
                perm.len()
            ))
            .into());
        }

        let mut seen = vec![false; rank];
        for &axis in perm {
            if axis >= rank || seen[axis] {
                return Err(TensorError::InvalidRank(format!(
                    "{perm:?} is not a valid permutation of 0..{rank}"
                ))
                .into());
            }
            seen[axis] = true;
        }

        Ok(Self {
            dimensions: perm.iter().map(|&axis| self.dimensions[axis]).collect(),
            strides: perm.iter().map(|&axis| self.strides[axis]).collect(),
            offset: self.offset,
        })
    }

    /// Returns `true` if the layout is row-major contiguous, i.e. reading it
    /// in index order visits the buffer in ascending address order with no
    /// gaps or broadcast (zero) strides.
    pub(crate) fn is_contiguous(&self) -> bool {
        self.strides == Self::compute_strides(&self.dimensions)
    }

    /// Creates a reshaped layout sharing the same total length.
    ///
    /// The new layout is freshly row-major; reshape is only valid on
    /// contiguous layouts (the caller is responsible for copying a
    /// non-contiguous tensor first).
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if the new shape's volume does not
    ///   match the current size, or any dimension is zero.
    pub(crate) fn reshaped(&self, dimensions: &[usize]) -> Result<Self, Error> {
        let new_layout = Self::from_dimensions(dimensions)?;

        if new_layout.size() != self.size() {
            return Err(TensorError::InvalidShape(format!(
                "cannot reshape {:?} ({} elements) into {dimensions:?} ({} elements)",
                self.dimensions,
                self.size(),
                new_layout.size()
            ))
            .into());
        }

        Ok(new_layout)
    }
}

/// A reduction axis specification: every axis, or an explicit (possibly
/// negative, end-relative) list of axes.
#[derive(Debug, Clone)]
pub(crate) enum ReduceDims {
    /// Reduce every dimension (the spec's "`-1` with no further arg").
    All,
    /// Reduce exactly these axes, resolved modulo rank.
    Axes(Vec<isize>),
}

impl From<i32> for ReduceDims {
    fn from(value: i32) -> Self {
        if value == -1 {
            Self::All
        } else {
            Self::Axes(vec![value as isize])
        }
    }
}

impl From<&[i32]> for ReduceDims {
    fn from(value: &[i32]) -> Self {
        Self::Axes(value.iter().map(|&v| v as isize).collect())
    }
}

impl<const N: usize> From<[i32; N]> for ReduceDims {
    fn from(value: [i32; N]) -> Self {
        Self::Axes(value.iter().map(|&v| v as isize).collect())
    }
}
