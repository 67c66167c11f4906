//! Span definitions shared across crates.

/// Span covering one stage execution.
#[macro_export]
macro_rules! stage_span {
    ($kind:expr, $fingerprint:expr) => {
        ::tracing::info_span!("authgraph.stage", stage = %$kind, fingerprint = %$fingerprint)
    };
}

/// Span covering one batched traversal of the Record Store.
#[macro_export]
macro_rules! batch_span {
    ($operation:expr, $batch_size:expr) => {
        ::tracing::debug_span!("authgraph.batch", operation = $operation, batch_size = $batch_size)
    };
}
