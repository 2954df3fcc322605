//! The native driver interface.
//!
//! A [`Backend`] exposes the primitive entry points of an audio output
//! library: driver lookup and metadata, option list construction, and
//! open/play/close of device handles. It speaks in native terms (integer
//! driver ids, C strings, integer failure codes). The safe layer in
//! [`Ao`](crate::Ao), [`OptionList`](crate::OptionList) and
//! [`Device`](crate::Device) owns every resource handed out here and
//! translates every failure code into an [`Error`](crate::Error).
//!
//! [`LibAo`](crate::libao::LibAo) (feature `libao`) implements this trait for
//! the system libao.

use std::ffi::CStr;
use std::os::raw::c_int;

use crate::Driver;

/// The sample format record passed by value into the native open calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeFormat<'a> {
    /// Bits per sample.
    pub bits: c_int,
    /// Samples per second in a single channel.
    pub rate: c_int,
    /// Number of channels.
    pub channels: c_int,
    /// Native byte order code, see [`ByteOrder::to_native`](crate::ByteOrder::to_native).
    pub byte_format: c_int,
    /// Channel matrix, `None` for the default mapping. Only valid for the
    /// duration of the open call.
    pub matrix: Option<&'a CStr>,
}

/// Primitive entry points of a native audio output library.
///
/// Implementations do not need to guard against misuse: the safe layer calls
/// `initialize` before anything else and `shutdown` last, frees every option
/// list exactly once, and never uses a device handle after `close`.
///
/// Only [`Ao`](crate::Ao) drives a backend. It keeps the backend to itself,
/// so a shutdown can only come from dropping the [`Ao`](crate::Ao), which
/// every open [`Device`](crate::Device) borrows:
///
/// ```compile_fail
/// fn demo<B: aout::Backend>(ao: &aout::Ao<B>) {
///     ao.backend().shutdown(); // error: `backend` is private
/// }
/// ```
pub trait Backend {
    /// An open device.
    type Device;
    /// A key/value option list under construction.
    type Options;

    /// Starts the audio subsystem.
    ///
    /// # Safety
    /// Every call must be paired with exactly one later call to
    /// [`Backend::shutdown`].
    unsafe fn initialize(&self);

    /// Releases subsystem-wide resources.
    ///
    /// # Safety
    /// Must follow a matching [`Backend::initialize`], and no device opened
    /// through this backend may still be open.
    unsafe fn shutdown(&self);

    /// The preferred live driver, negative if there is none.
    fn default_driver_id(&self) -> c_int;

    /// Looks a driver up by its short name, negative if absent.
    fn driver_id(&self, short_name: &CStr) -> c_int;

    /// Metadata of a single driver, `None` for an invalid id.
    fn driver_info(&self, id: c_int) -> Option<Driver>;

    /// Metadata of every registered driver in registration order.
    fn driver_info_list(&self) -> Vec<Driver>;

    /// An empty option list.
    fn new_options(&self) -> Self::Options;

    /// Appends a copy of `key` and `value`. Returns `false` when allocation
    /// fails; the list is left intact and must still be freed.
    fn append_option(&self, options: &mut Self::Options, key: &CStr, value: &CStr) -> bool;

    /// Frees every node of the list.
    fn free_options(&self, options: Self::Options);

    /// Opens a live output device. Fails with a native failure code.
    fn open_live(
        &self,
        driver_id: c_int,
        format: &NativeFormat<'_>,
        options: &Self::Options,
    ) -> Result<Self::Device, c_int>;

    /// Opens a file output device writing to `path`. Fails with a native
    /// failure code.
    fn open_file(
        &self,
        driver_id: c_int,
        path: &CStr,
        overwrite: bool,
        format: &NativeFormat<'_>,
        options: &Self::Options,
    ) -> Result<Self::Device, c_int>;

    /// Submits raw sample bytes. `false` signals a submission failure.
    fn play(&self, device: &mut Self::Device, samples: &[u8]) -> bool;

    /// Closes the device, reporting whether the native close succeeded.
    fn close(&self, device: Self::Device) -> bool;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Device = B::Device;
    type Options = B::Options;

    unsafe fn initialize(&self) {
        // SAFETY: forwarded, the caller upholds the contract.
        unsafe { (**self).initialize() }
    }

    unsafe fn shutdown(&self) {
        // SAFETY: forwarded, the caller upholds the contract.
        unsafe { (**self).shutdown() }
    }

    fn default_driver_id(&self) -> c_int {
        (**self).default_driver_id()
    }

    fn driver_id(&self, short_name: &CStr) -> c_int {
        (**self).driver_id(short_name)
    }

    fn driver_info(&self, id: c_int) -> Option<Driver> {
        (**self).driver_info(id)
    }

    fn driver_info_list(&self) -> Vec<Driver> {
        (**self).driver_info_list()
    }

    fn new_options(&self) -> Self::Options {
        (**self).new_options()
    }

    fn append_option(&self, options: &mut Self::Options, key: &CStr, value: &CStr) -> bool {
        (**self).append_option(options, key, value)
    }

    fn free_options(&self, options: Self::Options) {
        (**self).free_options(options)
    }

    fn open_live(
        &self,
        driver_id: c_int,
        format: &NativeFormat<'_>,
        options: &Self::Options,
    ) -> Result<Self::Device, c_int> {
        (**self).open_live(driver_id, format, options)
    }

    fn open_file(
        &self,
        driver_id: c_int,
        path: &CStr,
        overwrite: bool,
        format: &NativeFormat<'_>,
        options: &Self::Options,
    ) -> Result<Self::Device, c_int> {
        (**self).open_file(driver_id, path, overwrite, format, options)
    }

    fn play(&self, device: &mut Self::Device, samples: &[u8]) -> bool {
        (**self).play(device, samples)
    }

    fn close(&self, device: Self::Device) -> bool {
        (**self).close(device)
    }
}
