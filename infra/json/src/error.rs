use std::borrow::Cow;

/// Errors that can occur while mapping JSON.
#[sn_derive::sn_error]
pub enum JsonError {
    /// Serialization or deserialization failure reported by `serde_json`.
    #[error("JSON error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Failure of the underlying reader or writer.
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// No key deserializer is registered for the requested key type.
    #[error("No key deserializer{}: {message}", format_context(.context))]
    NoKeyDeserializer { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A map key could not be converted to the key type.
    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal JSON error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
