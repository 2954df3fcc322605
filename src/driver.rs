use core::fmt;
use std::os::raw::c_int;

use crate::ByteOrder;

/// Identifies a driver within one audio subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverId(u32);

impl DriverId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Negative native ids are the "no driver" sentinel.
    pub(crate) fn from_native(id: c_int) -> Option<Self> {
        u32::try_from(id).ok().map(Self)
    }

    /// `None` if the id cannot be expressed as a native id, which means no
    /// such driver can exist.
    pub(crate) fn to_native(self) -> Option<c_int> {
        c_int::try_from(self.0).ok()
    }
}

impl From<u32> for DriverId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of output a driver produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    /// Streams to audio hardware in real time.
    Live,
    /// Writes to a file.
    File,
}

/// Metadata describing a driver. A snapshot: it does not change when the
/// subsystem does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Driver {
    pub(crate) id: DriverId,
    pub(crate) kind: DriverKind,
    pub(crate) name: String,
    pub(crate) short_name: String,
    pub(crate) author: String,
    pub(crate) comment: String,
    pub(crate) preferred_byte_order: ByteOrder,
    pub(crate) priority: i32,
    pub(crate) options: Vec<String>,
}

impl Driver {
    /// Builds driver metadata. Used by [`Backend`](crate::Backend)
    /// implementations.
    pub fn new(id: DriverId, kind: DriverKind, short_name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            short_name: short_name.into(),
            author: String::new(),
            comment: String::new(),
            preferred_byte_order: ByteOrder::Native,
            priority: 0,
            options: Vec::new(),
        }
    }

    /// Sets the full, human readable name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn with_preferred_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.preferred_byte_order = byte_order;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the option keys the driver recognizes, in the driver's order.
    #[must_use]
    pub fn with_options<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.options = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> DriverId {
        self.id
    }

    pub fn kind(&self) -> DriverKind {
        self.kind
    }

    /// Whether this driver plays to audio hardware rather than to a file.
    pub fn is_live(&self) -> bool {
        self.kind == DriverKind::Live
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short name used to look the driver up, for example `"alsa"` or `"wav"`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn preferred_byte_order(&self) -> ByteOrder {
        self.preferred_byte_order
    }

    /// Higher is preferred when picking a default driver.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Option keys the driver recognizes.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn supports_option(&self, key: &str) -> bool {
        self.options.iter().any(|option| option == key)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.short_name, self.name)
    }
}
