//! Boolean arrays over byte storage

use std::ops::{Deref, DerefMut};

use crate::error::{OutOfRangeError, UsageError};
use crate::tag::Tag;

use super::Array;

/// A boolean array.
///
/// Elements are stored one byte each (0 or 1) so the buffer keeps the same
/// contiguous layout as numeric arrays and can be exposed as raw bytes. The
/// element type reports `bool` rather than `uint8`; any non-zero byte reads
/// as `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolArray {
    inner: Array<u8>,
}

impl BoolArray {
    /// Allocate an all-`false` array of the given shape
    pub fn new(shape: &[usize]) -> Self {
        Self {
            inner: Array::with_element(shape, Tag::Bool),
        }
    }

    /// Build from booleans in row-major order
    pub fn from_bools(shape: &[usize], values: Vec<bool>) -> Result<Self, UsageError> {
        let bytes = values.into_iter().map(u8::from).collect();
        Ok(Self::from_storage(Array::from_vec(shape, bytes)?))
    }

    /// Shape-only array without elements
    pub fn new_summary(shape: &[usize]) -> Self {
        Self::from_storage(Array::new_summary(shape))
    }

    /// Reinterpret a byte array as booleans
    pub fn from_storage(storage: Array<u8>) -> Self {
        Self {
            inner: storage.relabel(Tag::Bool),
        }
    }

    /// Underlying byte storage
    pub fn storage(&self) -> &Array<u8> {
        &self.inner
    }

    /// Give up the boolean view, returning the bytes as a `uint8` array
    pub fn into_storage(self) -> Array<u8> {
        self.inner.relabel(Tag::UInt8)
    }

    /// Truth value at a flat index, no shape check
    pub fn get(&self, index: usize) -> bool {
        self.inner[index] != 0
    }

    /// Set the truth value at a flat index, no shape check
    pub fn set(&mut self, index: usize, value: bool) {
        self.inner[index] = u8::from(value);
    }

    /// Bounds-checked truth value by multi-index
    pub fn at(&self, indices: &[usize]) -> Result<bool, OutOfRangeError> {
        self.inner.at(indices).map(|byte| *byte != 0)
    }

    /// Bounds-checked assignment by multi-index
    pub fn set_at(&mut self, indices: &[usize], value: bool) -> Result<(), OutOfRangeError> {
        *self.inner.at_mut(indices)? = u8::from(value);
        Ok(())
    }

    /// Iterate truth values in row-major order
    pub fn bools(&self) -> impl Iterator<Item = bool> + '_ {
        self.inner.iter().map(|byte| *byte != 0)
    }

    /// Collect truth values in row-major order
    pub fn to_bools(&self) -> Vec<bool> {
        self.bools().collect()
    }
}

impl Deref for BoolArray {
    type Target = Array<u8>;

    fn deref(&self) -> &Array<u8> {
        &self.inner
    }
}

impl DerefMut for BoolArray {
    fn deref_mut(&mut self) -> &mut Array<u8> {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_bool_element() {
        let arr = BoolArray::new(&[2, 2]);
        assert_eq!(arr.element_type(), Tag::Bool);
        assert_eq!(arr.element_type_name(), "bool");
        assert_eq!(arr.byte_size(), 4);
    }

    #[test]
    fn test_truth_values() {
        let mut arr = BoolArray::from_bools(&[3], vec![true, false, true]).unwrap();
        assert!(arr.get(0));
        assert!(!arr.get(1));
        arr.set(1, true);
        assert_eq!(arr.to_bools(), vec![true, true, true]);
    }

    #[test]
    fn test_nonzero_byte_is_true() {
        let mut arr = BoolArray::new(&[1]);
        arr.data_mut()[0] = 7;
        assert!(arr.get(0));
    }

    #[test]
    fn test_bounded_access() {
        let mut arr = BoolArray::new(&[2, 3]);
        arr.set_at(&[1, 2], true).unwrap();
        assert_eq!(arr.at(&[1, 2]), Ok(true));
        assert!(arr.get(5));
        assert!(arr.at(&[2, 0]).is_err());
        assert!(arr.set_at(&[0, 3], true).is_err());
    }

    #[test]
    fn test_raw_bytes_allowed() {
        let arr = BoolArray::from_bools(&[2], vec![false, true]).unwrap();
        assert_eq!(arr.as_bytes().unwrap(), &[0, 1]);
    }

    #[test]
    fn test_from_storage_relabels() {
        let bytes = Array::from_vec(&[2], vec![1u8, 0]).unwrap();
        assert_eq!(bytes.element_type(), Tag::UInt8);
        let arr = BoolArray::from_storage(bytes);
        assert_eq!(arr.element_type(), Tag::Bool);
        assert_eq!(arr.to_bools(), vec![true, false]);
    }

    #[test]
    fn test_into_storage_restores_uint8() {
        let arr = BoolArray::from_bools(&[2], vec![true, false]).unwrap();
        let bytes = arr.into_storage();
        assert_eq!(bytes.element_type(), Tag::UInt8);
        assert_eq!(bytes.data(), &[1, 0]);
    }
}
