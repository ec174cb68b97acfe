use std::borrow::Cow;

/// Errors that can occur during service lookup.
#[sn_derive::sn_error]
pub enum ServiceError {
    /// No registered instance satisfies the request.
    #[error("Service not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A stored instance could not be downcast to its registered type.
    /// This indicates an invariant violation in the registry.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A property key that the serialized form reserves for itself.
    #[error("Reserved property key{}: {message}", format_context(.context))]
    ReservedProperty { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal service error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
