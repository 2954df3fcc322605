//! The sample format negotiated between the caller and a device.
//!
//! # Example
//!
//! ```
//! use aout::{ByteOrder, SampleFormat, SampleWidth};
//! use std::num::NonZero;
//!
//! let format = SampleFormat::new(
//!     SampleWidth::Sixteen,
//!     NonZero::new(44_100).expect("not zero"),
//!     NonZero::new(2).expect("not zero"),
//! )
//! .with_byte_order(ByteOrder::Little)
//! .with_matrix("L,R");
//! assert_eq!(format.bits(), 16);
//! ```

use std::ffi::{CStr, CString};
use std::os::raw::c_int;

use crate::backend::NativeFormat;
use crate::{ChannelCount, Error, Result, SampleRate};

/// Byte ordering of multi-byte samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
    /// Whatever the host machine uses.
    #[default]
    Native,
}

impl ByteOrder {
    const LITTLE: c_int = 1;
    const BIG: c_int = 2;
    const NATIVE: c_int = 4;

    /// The code the native driver interface uses for this byte order.
    pub fn to_native(self) -> c_int {
        match self {
            ByteOrder::Little => Self::LITTLE,
            ByteOrder::Big => Self::BIG,
            ByteOrder::Native => Self::NATIVE,
        }
    }

    /// Decodes a native byte order code. Unknown codes are treated as
    /// [`ByteOrder::Native`].
    pub fn from_native(code: c_int) -> Self {
        match code {
            Self::LITTLE => ByteOrder::Little,
            Self::BIG => ByteOrder::Big,
            _ => ByteOrder::Native,
        }
    }
}

/// Width of a single sample.
///
/// Must match the buffer element width used when playing: use
/// [`Device::play`](crate::Device::play) for [`SampleWidth::Eight`] and
/// [`Device::play16`](crate::Device::play16) for [`SampleWidth::Sixteen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleWidth {
    /// 8 bits per sample.
    Eight,
    /// 16 bits per sample.
    Sixteen,
}

impl SampleWidth {
    /// Number of bits in a sample.
    pub fn bits(self) -> u16 {
        match self {
            SampleWidth::Eight => 8,
            SampleWidth::Sixteen => 16,
        }
    }

    /// Number of bytes in a sample.
    pub fn bytes(self) -> usize {
        usize::from(self.bits() / 8)
    }
}

/// Describes the samples a device is opened for. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleFormat {
    width: SampleWidth,
    sample_rate: SampleRate,
    channels: ChannelCount,
    byte_order: ByteOrder,
    matrix: Option<String>,
}

impl SampleFormat {
    /// A format in native byte order using the driver's default channel
    /// mapping.
    pub fn new(width: SampleWidth, sample_rate: SampleRate, channels: ChannelCount) -> Self {
        Self {
            width,
            sample_rate,
            channels,
            byte_order: ByteOrder::Native,
            matrix: None,
        }
    }

    /// Sets the byte order of the samples.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets the channel matrix, for example `"L,R"`. An empty matrix selects
    /// the default channel mapping.
    #[must_use]
    pub fn with_matrix(mut self, matrix: impl Into<String>) -> Self {
        let matrix = matrix.into();
        self.matrix = (!matrix.is_empty()).then_some(matrix);
        self
    }

    pub fn width(&self) -> SampleWidth {
        self.width
    }

    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        self.width.bits()
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn channels(&self) -> ChannelCount {
        self.channels
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// The channel matrix, `None` for the default mapping.
    pub fn matrix(&self) -> Option<&str> {
        self.matrix.as_deref()
    }

    /// Duplicates the channel matrix as a C string for the duration of an
    /// open call.
    pub(crate) fn matrix_c_string(&self) -> Result<Option<CString>> {
        self.matrix
            .as_deref()
            .map(CString::new)
            .transpose()
            .map_err(|_| Error::BadOption)
    }

    /// The by-value record handed to the native open calls. Rates or channel
    /// counts the native integer cannot hold are rejected as bad options.
    pub(crate) fn to_native<'a>(&self, matrix: Option<&'a CStr>) -> Result<NativeFormat<'a>> {
        Ok(NativeFormat {
            bits: c_int::from(self.bits()),
            rate: c_int::try_from(self.sample_rate.get()).map_err(|_| Error::BadOption)?,
            channels: c_int::from(self.channels.get()),
            byte_format: self.byte_order.to_native(),
            matrix,
        })
    }
}
