use std::borrow::Cow;

/// Errors that can occur during change feed operations.
#[ihub_derive::ihub_error]
pub enum FeedError {
    /// Occurs when an internal dynamic cast fails.
    /// This usually indicates an invariant violation in the type registry.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Channel exists but with a different kind (broadcast/queue).
    #[error("Channel kind mismatch{}: {message}", format_context(.context))]
    KindMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The queue receiver for this change type was already claimed.
    #[error("Trigger already attached{}: {message}", format_context(.context))]
    TriggerTaken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A bounded queue is full and cannot accept more changes.
    #[error("Queue full{}: {message}", format_context(.context))]
    QueueFull { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero for bounded queues.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
