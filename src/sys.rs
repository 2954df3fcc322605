//! Raw libao declarations and the marshaling of its driver metadata.
//!
//! The record layouts and the decoding helpers are always compiled; the
//! `extern` block only with the `libao` feature.
#![allow(non_camel_case_types)]
#![cfg_attr(not(feature = "libao"), allow(dead_code))]

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

use crate::{ByteOrder, Driver, DriverId, DriverKind};

pub(crate) const AO_TYPE_LIVE: c_int = 1;

/// Opaque device handle.
#[repr(C)]
pub(crate) struct ao_device {
    _private: [u8; 0],
}

#[repr(C)]
pub(crate) struct ao_sample_format {
    pub bits: c_int,
    pub rate: c_int,
    pub channels: c_int,
    pub byte_format: c_int,
    pub matrix: *mut c_char,
}

#[repr(C)]
pub(crate) struct ao_option {
    pub key: *mut c_char,
    pub value: *mut c_char,
    pub next: *mut ao_option,
}

#[repr(C)]
pub(crate) struct ao_info {
    pub kind: c_int,
    pub name: *mut c_char,
    pub short_name: *mut c_char,
    pub author: *mut c_char,
    pub comment: *mut c_char,
    pub preferred_byte_format: c_int,
    pub priority: c_int,
    pub options: *mut *mut c_char,
    pub option_count: c_int,
}

#[cfg(feature = "libao")]
#[link(name = "ao")]
extern "C" {
    pub(crate) fn ao_initialize();
    pub(crate) fn ao_shutdown();

    pub(crate) fn ao_default_driver_id() -> c_int;
    pub(crate) fn ao_driver_id(short_name: *const c_char) -> c_int;
    pub(crate) fn ao_driver_info(driver_id: c_int) -> *mut ao_info;
    pub(crate) fn ao_driver_info_list(driver_count: *mut c_int) -> *mut *mut ao_info;

    pub(crate) fn ao_append_option(
        options: *mut *mut ao_option,
        key: *const c_char,
        value: *const c_char,
    ) -> c_int;
    pub(crate) fn ao_free_options(options: *mut ao_option);

    pub(crate) fn ao_open_live(
        driver_id: c_int,
        format: *mut ao_sample_format,
        options: *mut ao_option,
    ) -> *mut ao_device;
    pub(crate) fn ao_open_file(
        driver_id: c_int,
        filename: *const c_char,
        overwrite: c_int,
        format: *mut ao_sample_format,
        options: *mut ao_option,
    ) -> *mut ao_device;
    pub(crate) fn ao_play(device: *mut ao_device, output_samples: *mut c_char, num_bytes: u32)
        -> c_int;
    pub(crate) fn ao_close(device: *mut ao_device) -> c_int;
}

/// Number of live users of the process-wide library state.
///
/// Decides which caller runs `ao_initialize` and `ao_shutdown`: the first
/// user in, the last user out.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct InitCount(usize);

impl InitCount {
    pub(crate) const fn new() -> Self {
        Self(0)
    }

    /// Registers a user, `true` if the library must be initialized.
    pub(crate) fn acquire(&mut self) -> bool {
        self.0 = self.0.saturating_add(1);
        self.0 == 1
    }

    /// Unregisters a user, `true` if the library must be shut down. A release
    /// without a matching acquire changes nothing.
    pub(crate) fn release(&mut self) -> bool {
        match self.0 {
            0 => false,
            users => {
                self.0 = users - 1;
                self.0 == 0
            }
        }
    }

    pub(crate) fn users(&self) -> usize {
        self.0
    }
}

/// Copies a C string, null decodes to an empty string.
///
/// # Safety
/// `ptr` is null or points to a NUL terminated string.
unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Views a native array as a slice, empty when null or when the count is not
/// positive.
///
/// # Safety
/// Unless null, `ptr` points to at least `count` initialized elements that
/// outlive the returned slice.
unsafe fn native_slice<'a, T>(ptr: *const T, count: c_int) -> &'a [T] {
    match usize::try_from(count) {
        Ok(len) if len > 0 && !ptr.is_null() => std::slice::from_raw_parts(ptr, len),
        _ => &[],
    }
}

/// Decodes one driver record into owned metadata.
///
/// # Safety
/// `info` points to a valid `ao_info` whose strings and option array are
/// valid for the duration of the call.
pub(crate) unsafe fn driver_from_info(id: DriverId, info: &ao_info) -> Driver {
    let options = native_slice(info.options, info.option_count)
        .iter()
        .map(|&key| owned_string(key))
        .collect();

    Driver {
        id,
        kind: if info.kind == AO_TYPE_LIVE {
            DriverKind::Live
        } else {
            DriverKind::File
        },
        name: owned_string(info.name),
        short_name: owned_string(info.short_name),
        author: owned_string(info.author),
        comment: owned_string(info.comment),
        preferred_byte_order: ByteOrder::from_native(info.preferred_byte_format),
        priority: info.priority,
        options,
    }
}

/// Decodes the array returned by `ao_driver_info_list`. A driver's id is its
/// index in the array; null entries are skipped.
///
/// # Safety
/// Unless null, `infos` points to `count` pointers, each null or pointing to
/// a valid `ao_info`.
pub(crate) unsafe fn drivers_from_info_list(infos: *const *mut ao_info, count: c_int) -> Vec<Driver> {
    native_slice(infos, count)
        .iter()
        .enumerate()
        .filter_map(|(index, &info)| {
            let id = DriverId::new(u32::try_from(index).ok()?);
            info.as_ref().map(|info| driver_from_info(id, info))
        })
        .collect()
}
