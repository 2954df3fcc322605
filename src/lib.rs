//! Audio output through native drivers.
//!
//! This crate lets you enumerate the sound output drivers of an audio
//! subsystem, open a live playback device or a file sink with a negotiated
//! sample format and driver specific options, and stream raw samples to it.
//!
//! The native driver interface is abstracted by the [`Backend`] trait. With the
//! `libao` feature enabled, [`LibAo`](libao::LibAo) binds the system libao.
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
//! for driver in ao.drivers() {
//!     println!("{}: {driver}", driver.id());
//! }
//!
//! let wav = ao.driver_id("wav").ok_or(aout::Error::NoDriver)?;
//! let format = SampleFormat::new(
//!     SampleWidth::Sixteen,
//!     NonZero::new(44_100).expect("not zero"),
//!     NonZero::new(2).expect("not zero"),
//! );
//! let mut device = ao.open_file(wav, "out.wav", true, &format, &[])?;
//! device.play16(&[0; 4]);
//! device.close();
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "libao"))]
//! # fn main() {}
//! ```
//!
//! # Resource ownership
//!
//! - [`Ao`] initializes the subsystem when created and shuts it down when
//!   dropped. Devices borrow it, so it cannot go away while one is open.
//! - Option lists, the duplicated channel matrix and the duplicated file path
//!   exist only for the duration of a single open call. They are released on
//!   every path out of it.
//! - A [`Device`] owns its native handle until it is closed or dropped.
//!
//! # Optional Features
//!
//! - `libao`: link the system libao and provide [`LibAo`](libao::LibAo).
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events for device
//!   lifecycle and misuse such as playing on a closed device.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod common;
mod context;
mod device;
mod driver;
mod error;
mod format;
mod options;
mod sys;

pub mod backend;
#[cfg(feature = "libao")]
#[cfg_attr(docsrs, doc(cfg(feature = "libao")))]
pub mod libao;

pub use crate::backend::{Backend, NativeFormat};
pub use crate::common::{ChannelCount, SampleRate};
pub use crate::context::Ao;
pub use crate::device::{Device, DeviceKind, DeviceState};
pub use crate::driver::{Driver, DriverId, DriverKind};
pub use crate::error::{code, Error, Result};
pub use crate::format::{ByteOrder, SampleFormat, SampleWidth};
pub use crate::options::{DriverOption, OptionList};
