//! Driver options applied when a device is opened.
//!
//! Options are consumed once by the native open call. [`OptionList`] owns the
//! native list for exactly that long: it is freed when the list is dropped,
//! whether the open succeeded, failed, or was never attempted because an
//! append failed.

use core::fmt;
use std::ffi::CString;
use std::mem::ManuallyDrop;

use crate::{Backend, Error, Result};

/// A driver specific key/value pair, for example `("dev", "hw:1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DriverOption {
    pub key: String,
    pub value: String,
}

impl DriverOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for DriverOption {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl fmt::Display for DriverOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A native option list under construction.
///
/// Freed exactly once, on drop or through [`OptionList::release`].
#[must_use]
pub struct OptionList<'b, B: Backend> {
    backend: &'b B,
    raw: ManuallyDrop<B::Options>,
    len: usize,
}

impl<'b, B: Backend> OptionList<'b, B> {
    /// An empty list.
    pub fn new(backend: &'b B) -> Self {
        Self {
            backend,
            raw: ManuallyDrop::new(backend.new_options()),
            len: 0,
        }
    }

    /// Builds a list holding `options` in order. If any append fails the
    /// partial list is freed before the error is returned.
    pub fn build(backend: &'b B, options: &[DriverOption]) -> Result<Self> {
        let mut list = Self::new(backend);
        for option in options {
            list.append(&option.key, &option.value)?;
        }
        Ok(list)
    }

    /// Appends one pair to the end of the list.
    ///
    /// Fails with [`Error::OutOfMemory`] if the native list could not grow and
    /// with [`Error::BadOption`] if the key or value holds a NUL byte. The
    /// key and value are duplicated only for the duration of the append.
    pub fn append(&mut self, key: &str, value: &str) -> Result<()> {
        let key = CString::new(key).map_err(|_| Error::BadOption)?;
        let value = CString::new(value).map_err(|_| Error::BadOption)?;
        if !self.backend.append_option(&mut self.raw, &key, &value) {
            return Err(Error::OutOfMemory);
        }
        self.len += 1;
        Ok(())
    }

    /// Number of pairs appended so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The native list, valid until this list is released.
    pub fn as_raw(&self) -> &B::Options {
        &self.raw
    }

    /// Frees the native list now rather than at the end of the scope.
    pub fn release(self) {}
}

impl<B: Backend> Drop for OptionList<'_, B> {
    fn drop(&mut self) {
        // SAFETY: `raw` is taken exactly once, here, and never touched again.
        let raw = unsafe { ManuallyDrop::take(&mut self.raw) };
        self.backend.free_options(raw);
    }
}

impl<B: Backend> fmt::Debug for OptionList<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionList").field("len", &self.len).finish()
    }
}
