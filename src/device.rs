//! An open playback or file output device.
//!
//! # Basic Usage
//!
//! ```no_run
//! # #[cfg(feature = "libao")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use aout::{Ao, SampleFormat, SampleWidth};
//! use std::num::NonZero;
//!
//! let ao = Ao::new();
//! let driver = ao.default_driver_id().ok_or(aout::Error::NoDriver)?;
//! let format = SampleFormat::new(
//!     SampleWidth::Sixteen,
//!     NonZero::new(44_100).expect("not zero"),
//!     NonZero::new(2).expect("not zero"),
//! );
//! let mut device = ao.open_live(driver, &format, &[("dev", "default").into()])?;
//!
//! // A tenth of a second of silence
//! if !device.play16(&[0i16; 8_820]) {
//!     eprintln!("the device rejected the samples");
//! }
//! device.close();
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "libao"))]
//! # fn main() {}
//! ```

use core::fmt;

use crate::common::report_error;
use crate::{Ao, Backend, DriverId, SampleFormat};

/// Whether a device plays to hardware or writes a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Live,
    File,
}

/// Lifecycle state of a [`Device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    /// Usable.
    Open,
    /// The native handle has been released. Terminal.
    Closed,
}

/// An open output device, created by [`Ao::open_live`] or [`Ao::open_file`].
///
/// Owns its native handle until [`Device::close`] or drop. Once closed the
/// handle is never used again: [`play`](Device::play),
/// [`play16`](Device::play16) and [`close`](Device::close) become no-ops
/// returning `false`.
///
/// Submitting samples takes `&mut self`, so one device is only ever driven from
/// one place at a time. Distinct devices are independent.
pub struct Device<'ao, B: Backend> {
    ao: &'ao Ao<B>,
    handle: Option<B::Device>,
    driver: DriverId,
    kind: DeviceKind,
    format: SampleFormat,
}

impl<'ao, B: Backend> Device<'ao, B> {
    pub(crate) fn new(
        ao: &'ao Ao<B>,
        handle: B::Device,
        driver: DriverId,
        kind: DeviceKind,
        format: SampleFormat,
    ) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(%driver, ?kind, ?format, "device opened");
        Self {
            ao,
            handle: Some(handle),
            driver,
            kind,
            format,
        }
    }

    /// Submits raw sample bytes, typically 8-bit samples.
    ///
    /// The byte length is passed through unchanged. It is not checked
    /// against the format the device was opened with, so a 16-bit device
    /// accepts an odd number of bytes here.
    ///
    /// Returns `false` if the device rejected the samples, for example
    /// because it was disconnected, or if the device is closed. The caller
    /// decides whether to retry or stop the stream.
    pub fn play(&mut self, samples: &[u8]) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(driver = %self.driver, "play on a closed device");
            return false;
        };
        self.ao.backend().play(handle, samples)
    }

    /// Submits signed 16-bit samples in native memory order. Exactly
    /// `2 * samples.len()` bytes reach the driver.
    ///
    /// Returns `false` under the same conditions as [`Device::play`].
    pub fn play16(&mut self, samples: &[i16]) -> bool {
        self.play(as_bytes(samples))
    }

    /// Closes the device and reports whether the driver closed it cleanly.
    /// The device is `Closed` afterwards either way.
    ///
    /// Closing a device that is already closed does nothing and returns
    /// `false`.
    pub fn close(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(driver = %self.driver, "close on a closed device");
            return false;
        };
        let closed = self.ao.backend().close(handle);
        #[cfg(feature = "tracing")]
        tracing::debug!(driver = %self.driver, clean = closed, "device closed");
        closed
    }

    /// Whether the native handle is still held.
    pub fn state(&self) -> DeviceState {
        if self.handle.is_some() {
            DeviceState::Open
        } else {
            DeviceState::Closed
        }
    }

    /// Shorthand for `state() == DeviceState::Open`.
    pub fn is_open(&self) -> bool {
        self.state() == DeviceState::Open
    }

    /// The driver this device was opened with.
    pub fn driver_id(&self) -> DriverId {
        self.driver
    }

    /// Live playback or file output.
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// The format the device was opened with.
    pub fn format(&self) -> &SampleFormat {
        &self.format
    }
}

impl<B: Backend> Drop for Device<'_, B> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            #[cfg(feature = "tracing")]
            tracing::warn!(driver = %self.driver, "device dropped while open, closing it");
            if !self.ao.backend().close(handle) {
                report_error!("failed to close audio device of driver {}", self.driver);
            }
        }
    }
}

impl<B: Backend> fmt::Debug for Device<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("driver", &self.driver)
            .field("kind", &self.kind)
            .field("state", &self.state())
            .field("format", &self.format)
            .finish()
    }
}

fn as_bytes(samples: &[i16]) -> &[u8] {
    // SAFETY: `i16` has no padding and `u8` has no alignment requirement, so
    // the same memory viewed as bytes is `size_of_val(samples)` valid bytes
    // borrowed for the same lifetime.
    unsafe {
        std::slice::from_raw_parts(samples.as_ptr().cast::<u8>(), std::mem::size_of_val(samples))
    }
}
