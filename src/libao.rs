//! Backend for the system libao.
//!
//! libao keeps its driver table in process-wide state. [`LibAo`] counts the
//! live [`Ao`](crate::Ao) handles so that only the first one initializes the
//! library and only the last one shuts it down.
//!
//! The backend is only reachable through [`Ao::new`](crate::Ao::new), so
//! libao cannot be shut down behind an open device:
//!
//! ```compile_fail
//! let backend = aout::libao::LibAo(());
//! ```

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::ptr::{self, NonNull};
use std::sync::{Mutex, PoisonError};

use crate::backend::{Backend, NativeFormat};
use crate::error::code;
use crate::{sys, Driver, DriverId};

static USERS: Mutex<sys::InitCount> = Mutex::new(sys::InitCount::new());

/// The system libao. Built by [`Ao::new`](crate::Ao::new).
#[derive(Debug)]
pub struct LibAo(());

/// An open libao device.
#[derive(Debug)]
pub struct RawDevice(NonNull<sys::ao_device>);

// SAFETY: libao device handles are not tied to the thread that opened them.
// `Device` hands out `&mut` access only, so a handle is used from one thread
// at a time.
unsafe impl Send for RawDevice {}

/// Head of a libao option list, null while empty.
#[derive(Debug)]
pub struct RawOptions(*mut sys::ao_option);

impl LibAo {
    pub(crate) fn new() -> Self {
        Self(())
    }

    /// The errno libao left behind after a failed open.
    fn last_error() -> c_int {
        std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(code::FAIL)
    }

    fn opened(device: *mut sys::ao_device) -> Result<RawDevice, c_int> {
        NonNull::new(device).map(RawDevice).ok_or_else(Self::last_error)
    }
}

/// Byte count as libao takes it, `None` if the buffer is too large.
fn native_len(len: usize) -> Option<u32> {
    let native = u32::try_from(len).ok();
    #[cfg(feature = "tracing")]
    if native.is_none() {
        tracing::warn!(len, "sample buffer too large for libao");
    }
    native
}

/// The native record, pointing into `format`'s borrowed matrix.
fn sample_format(format: &NativeFormat<'_>) -> sys::ao_sample_format {
    sys::ao_sample_format {
        bits: format.bits,
        rate: format.rate,
        channels: format.channels,
        byte_format: format.byte_format,
        // libao only reads the matrix
        matrix: format
            .matrix
            .map_or(ptr::null_mut(), |matrix| matrix.as_ptr() as *mut c_char),
    }
}

impl Backend for LibAo {
    type Device = RawDevice;
    type Options = RawOptions;

    unsafe fn initialize(&self) {
        let mut users = USERS.lock().unwrap_or_else(PoisonError::into_inner);
        if users.acquire() {
            // SAFETY: guarded by `USERS`, not initialized yet.
            unsafe { sys::ao_initialize() };
        }
    }

    unsafe fn shutdown(&self) {
        let mut users = USERS.lock().unwrap_or_else(PoisonError::into_inner);
        if users.release() {
            // SAFETY: the last user is going away and the caller guarantees
            // none of its devices is open.
            unsafe { sys::ao_shutdown() };
        }
    }

    fn default_driver_id(&self) -> c_int {
        // SAFETY: initialized, no arguments.
        unsafe { sys::ao_default_driver_id() }
    }

    fn driver_id(&self, short_name: &CStr) -> c_int {
        // SAFETY: libao does not keep the name past the call.
        unsafe { sys::ao_driver_id(short_name.as_ptr()) }
    }

    fn driver_info(&self, id: c_int) -> Option<Driver> {
        let id_out = DriverId::from_native(id)?;
        // SAFETY: the returned record is owned by libao and valid until
        // shutdown, it is copied before returning.
        unsafe {
            let info = sys::ao_driver_info(id);
            info.as_ref().map(|info| sys::driver_from_info(id_out, info))
        }
    }

    fn driver_info_list(&self) -> Vec<Driver> {
        let mut count: c_int = 0;
        // SAFETY: libao returns `count` records it owns, they are copied
        // before returning.
        unsafe {
            let infos = sys::ao_driver_info_list(&mut count);
            sys::drivers_from_info_list(infos, count)
        }
    }

    fn new_options(&self) -> Self::Options {
        RawOptions(ptr::null_mut())
    }

    fn append_option(&self, options: &mut Self::Options, key: &CStr, value: &CStr) -> bool {
        // SAFETY: libao copies key and value into a node it allocates and
        // links at the end of the list.
        unsafe { sys::ao_append_option(&mut options.0, key.as_ptr(), value.as_ptr()) != 0 }
    }

    fn free_options(&self, options: Self::Options) {
        // SAFETY: the list was built by `ao_append_option` and is freed once,
        // null is accepted.
        unsafe { sys::ao_free_options(options.0) }
    }

    fn open_live(
        &self,
        driver_id: c_int,
        format: &NativeFormat<'_>,
        options: &Self::Options,
    ) -> Result<Self::Device, c_int> {
        let mut format = sample_format(format);
        // SAFETY: format and options outlive the call, libao copies what it
        // keeps.
        let device = unsafe { sys::ao_open_live(driver_id, &mut format, options.0) };
        Self::opened(device)
    }

    fn open_file(
        &self,
        driver_id: c_int,
        path: &CStr,
        overwrite: bool,
        format: &NativeFormat<'_>,
        options: &Self::Options,
    ) -> Result<Self::Device, c_int> {
        let mut format = sample_format(format);
        // SAFETY: see `open_live`, the same holds for the path.
        let device = unsafe {
            sys::ao_open_file(
                driver_id,
                path.as_ptr(),
                c_int::from(overwrite),
                &mut format,
                options.0,
            )
        };
        Self::opened(device)
    }

    fn play(&self, device: &mut Self::Device, samples: &[u8]) -> bool {
        let Some(num_bytes) = native_len(samples.len()) else {
            return false;
        };
        // SAFETY: libao reads `num_bytes` bytes from the buffer and does not
        // write to it or keep it.
        unsafe { sys::ao_play(device.0.as_ptr(), samples.as_ptr() as *mut c_char, num_bytes) != 0 }
    }

    fn close(&self, device: Self::Device) -> bool {
        // SAFETY: the handle is open and consumed here.
        unsafe { sys::ao_close(device.0.as_ptr()) != 0 }
    }
}
