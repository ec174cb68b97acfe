use std::borrow::Cow;

/// Errors raised by iterators and range containers.
#[sn_derive::sn_error]
pub enum UtilError {
    /// Underlying I/O failure (opening or reading a resource).
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// A range whose bounds are out of order, or two ranges that cannot be merged.
    #[error("Invalid range{}: {message}", format_context(.context))]
    InvalidRange { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Text that does not describe a range or range set.
    #[error("Parse error{}: {message}", format_context(.context))]
    Parse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Releasing an iterator's resource failed.
    #[error("Release failed{}: {message}", format_context(.context))]
    Release { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
