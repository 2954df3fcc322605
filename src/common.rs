/// Stream sample rate (samples per second per channel).
pub type SampleRate = std::num::NonZero<u32>;

/// Number of channels in a stream.
pub type ChannelCount = std::num::NonZero<u16>;

/// Fails to compile unless the error type is usable across threads and can be
/// cloned, boxed and used as a `source`.
macro_rules! assert_error_traits {
    ($to_test:path) => {
        const _: () = {
            const fn check<T: std::error::Error + Send + Sync + Clone + 'static>() {}
            check::<$to_test>();
        };
    };
}
pub(crate) use assert_error_traits;

/// Reports a condition the caller cannot act on anymore, like a failed close
/// while a device is being dropped.
macro_rules! report_error {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        tracing::error!($($arg)+);
        #[cfg(not(feature = "tracing"))]
        eprintln!($($arg)+);
    }};
}
pub(crate) use report_error;
