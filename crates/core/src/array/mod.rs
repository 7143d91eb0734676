//! Strided multi-dimensional arrays
//!
//! Arrays hold their elements in one contiguous buffer in row-major order:
//! the last dimension varies fastest. Strides are derived from the shape at
//! construction time:
//!
//! ```text
//! stride[last] = 1
//! stride[i]    = stride[i + 1] * shape[i + 1]
//! ```
//!
//! A shape with zero dimensions is legal and describes a single element.
//!
//! Two access paths exist:
//! - `array[i]` and `array[(row, col)]` index the flat buffer directly with no
//!   shape checks (out-of-buffer indices still panic like any slice index)
//! - [`Array::at`] validates every index against the shape and supports at
//!   most [`MAX_INDEXED_DIMENSIONS`] dimensions

mod any;
mod boolean;
mod matrix;

pub use any::AnyArray;
pub use boolean::BoolArray;
pub use matrix::MatrixView;

use std::ops::{Index, IndexMut};

use crate::attribute::Meta;
use crate::error::{OutOfRangeError, UsageError};
use crate::tag::{Element, Tag};

/// Upper bound on the dimension count accepted by bounds-checked access
pub const MAX_INDEXED_DIMENSIONS: usize = 10;

/// Row-major strides for `shape`.
///
/// Strides saturate at `usize::MAX` for shapes whose element count does not
/// fit in `usize`; such shapes are rejected by [`checked_element_count`].
pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1].saturating_mul(shape[i + 1]);
    }
    strides
}

/// Number of elements described by `shape`; 1 for a zero-dimensional shape.
///
/// Saturates at `usize::MAX`.
pub fn element_count(shape: &[usize]) -> usize {
    checked_element_count(shape).unwrap_or(usize::MAX)
}

/// Number of elements described by `shape`, or `None` on overflow
pub fn checked_element_count(shape: &[usize]) -> Option<usize> {
    shape
        .iter()
        .try_fold(1usize, |count, &extent| count.checked_mul(extent))
}

/// A multi-dimensional array of one element type.
///
/// The buffer length always equals the element count of the shape, except
/// for summaries, which keep the shape but hold no elements. Changing the
/// shape requires building a new instance (see [`Array::reshaped`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T: Element> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    element: Tag,
    data: Vec<T>,
    meta: Meta,
}

impl<T: Element> Array<T> {
    /// Allocate a default-filled array of the given shape.
    ///
    /// # Panics
    ///
    /// Panics like `vec!` when the buffer cannot be allocated. Use
    /// [`Array::try_new`] for shapes from untrusted input.
    pub fn new(shape: &[usize]) -> Self {
        Self::with_element(shape, T::TAG)
    }

    /// Allocate a default-filled array, failing instead of panicking when
    /// the shape overflows or the buffer cannot be allocated
    pub fn try_new(shape: &[usize]) -> Result<Self, UsageError> {
        let count = checked_element_count(shape).ok_or_else(|| UsageError::ShapeOverflow {
            shape: shape.to_vec(),
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(count)
            .map_err(|_| UsageError::AllocationFailed { elements: count })?;
        data.resize(count, T::default());
        Ok(Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            element: T::TAG,
            data,
            meta: Meta::default(),
        })
    }

    /// Build an array from an existing row-major buffer
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self, UsageError> {
        let expected = element_count(shape);
        if data.len() != expected {
            return Err(UsageError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            element: T::TAG,
            data,
            meta: Meta::default(),
        })
    }

    /// Shape-only array without elements, as produced by a summary
    pub fn new_summary(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            element: T::TAG,
            data: Vec::new(),
            meta: Meta::summary(),
        }
    }

    pub(crate) fn with_element(shape: &[usize], element: Tag) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            element,
            data: vec![T::default(); element_count(shape)],
            meta: Meta::default(),
        }
    }

    pub(crate) fn relabel(mut self, element: Tag) -> Self {
        self.element = element;
        self
    }

    /// Consume the array and build a new one with a different shape over the
    /// same buffer
    pub fn reshaped(self, shape: &[usize]) -> Result<Self, UsageError> {
        let expected = element_count(shape);
        if self.data.len() != expected {
            return Err(UsageError::ShapeMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            element: self.element,
            data: self.data,
            meta: self.meta,
        })
    }

    /// Extent of every dimension
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major stride of every dimension
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions
    pub fn dimension(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements held; 0 for summaries
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size of the element buffer in bytes
    pub fn byte_size(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    /// Element tag
    pub fn element_type(&self) -> Tag {
        self.element
    }

    /// Element wire type name
    pub fn element_type_name(&self) -> &'static str {
        self.element.wire_name()
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    /// True when the array was produced as a summary
    pub fn is_summary(&self) -> bool {
        self.meta.is_summary()
    }

    /// Flat element buffer in row-major order
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat element buffer
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate elements in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consume the array, returning the flat buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Raw bytes of the buffer in native layout, exactly `byte_size()` long.
    ///
    /// Fails for string arrays, whose storage is not contiguous.
    pub fn as_bytes(&self) -> Result<&[u8], UsageError> {
        T::raw_bytes(&self.data).ok_or(UsageError::NonContiguousBuffer {
            element: self.element,
        })
    }

    /// Writable raw bytes of the buffer.
    ///
    /// The view carries no synchronization; concurrent access must be
    /// serialized by the caller.
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8], UsageError> {
        let element = self.element;
        T::raw_bytes_mut(&mut self.data).ok_or(UsageError::NonContiguousBuffer { element })
    }

    /// Flat buffer offset of a multi-index, checked against the shape
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize, OutOfRangeError> {
        if self.shape.len() > MAX_INDEXED_DIMENSIONS {
            return Err(OutOfRangeError::TooManyDimensions {
                dimension: self.shape.len(),
                max: MAX_INDEXED_DIMENSIONS,
            });
        }
        if indices.len() != self.shape.len() {
            return Err(OutOfRangeError::IndexCountMismatch {
                expected: self.shape.len(),
                actual: indices.len(),
            });
        }
        for (axis, (&index, &extent)) in indices.iter().zip(&self.shape).enumerate() {
            if index >= extent {
                return Err(OutOfRangeError::IndexOutOfBounds {
                    axis,
                    index,
                    extent,
                });
            }
        }
        // saturates only for summaries, whose buffer is empty anyway
        Ok(indices
            .iter()
            .zip(&self.strides)
            .fold(0usize, |offset, (&index, &stride)| {
                offset.saturating_add(index.saturating_mul(stride))
            }))
    }

    /// Bounds-checked element access by multi-index
    pub fn at(&self, indices: &[usize]) -> Result<&T, OutOfRangeError> {
        let offset = self.offset_of(indices)?;
        self.data.get(offset).ok_or(OutOfRangeError::EmptyBuffer)
    }

    /// Bounds-checked mutable element access by multi-index
    pub fn at_mut(&mut self, indices: &[usize]) -> Result<&mut T, OutOfRangeError> {
        let offset = self.offset_of(indices)?;
        self.data.get_mut(offset).ok_or(OutOfRangeError::EmptyBuffer)
    }

    /// Read-only 2-D view; fails unless the array has exactly two dimensions
    pub fn matrix_view(&self) -> Result<MatrixView<'_, T>, UsageError> {
        MatrixView::new(self)
    }

    fn row_major(&self, row: usize, column: usize) -> usize {
        row * self.strides[0] + column
    }
}

impl<T: Element> Index<usize> for Array<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Element> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

/// Row/column access for 2-D arrays, no shape checks
impl<T: Element> Index<(usize, usize)> for Array<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        &self.data[self.row_major(row, column)]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Array<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        let offset = self.row_major(row, column);
        &mut self.data[offset]
    }
}

impl<'a, T: Element> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// `int8` array
pub type Int8Array = Array<i8>;
/// `int16` array
pub type Int16Array = Array<i16>;
/// `int32` array
pub type Int32Array = Array<i32>;
/// `int64` array
pub type Int64Array = Array<i64>;
/// `uint8` array
pub type UInt8Array = Array<u8>;
/// `uint16` array
pub type UInt16Array = Array<u16>;
/// `uint32` array
pub type UInt32Array = Array<u32>;
/// `uint64` array
pub type UInt64Array = Array<u64>;
/// `float32` array
pub type Float32Array = Array<f32>;
/// `float64` array
pub type Float64Array = Array<f64>;
/// `string` array
pub type StringArray = Array<String>;
