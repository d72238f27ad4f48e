//! Span macros and span helpers

/// Create a span with common HTTP request fields
///
/// # Example
///
/// ```rust
/// use devmate_observability::http_request_span;
///
/// let span = http_request_span!("POST", "/api/solve", "12345");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $path:expr, $request_id:expr) => {
        tracing::info_span!(
            "http.request",
            http.method = $method,
            http.route = $path,
            http.status_code = tracing::field::Empty,
            request.id = $request_id,
        )
    };
}

/// Create a span around one upstream model call
///
/// # Example
///
/// ```rust
/// use devmate_observability::provider_span;
///
/// let span = provider_span!("gemini", "gemini-pro");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! provider_span {
    ($provider:expr, $model:expr) => {
        tracing::info_span!(
            "provider.generate",
            provider.id = $provider,
            provider.model = $model,
            provider.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and emit an error event.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration (milliseconds) under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
