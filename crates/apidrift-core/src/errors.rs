use apidrift_core_types::{ComparisonId, RunId};

/// Result type alias using DriftError
pub type Result<T> = std::result::Result<T, DriftError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// testing, and external API responses. Transport and parse failures on one
/// side of a comparison are NOT errors here: the orchestrator absorbs them
/// into the difference list so the comparison still completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftErrorKind {
    // Request dispatch (rejected before any I/O)
    /// Malformed endpoint spec or payload
    InvalidInput,
    /// Method outside the GET/POST/PUT/DELETE set
    UnsupportedMethod,
    /// A configured or per-call base URL failed to parse
    InvalidBaseUrl,

    // Integration/IO
    Serialization,
    /// Failure talking to an external collaborator other than the two
    /// comparison targets (those degrade into difference records instead)
    ExternalService,
    Timeout,
    /// The optional history sink rejected a write (logged, never fatal to a
    /// comparison)
    SinkUnavailable,

    // Internal
    Internal,
}

impl DriftErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DriftErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            DriftErrorKind::UnsupportedMethod => "ERR_UNSUPPORTED_METHOD",
            DriftErrorKind::InvalidBaseUrl => "ERR_INVALID_BASE_URL",
            DriftErrorKind::Serialization => "ERR_SERIALIZATION",
            DriftErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            DriftErrorKind::Timeout => "ERR_TIMEOUT",
            DriftErrorKind::SinkUnavailable => "ERR_SINK_UNAVAILABLE",
            DriftErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Provides a structured representation of errors with classification
/// fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct DriftError {
    kind: DriftErrorKind,
    op: Option<String>,
    endpoint: Option<String>,
    method: Option<String>,
    run_id: Option<RunId>,
    comparison_id: Option<ComparisonId>,
    message: String,
    source: Option<Box<DriftError>>,
}

impl DriftError {
    /// Create a new error with the specified kind
    pub fn new(kind: DriftErrorKind) -> Self {
        Self {
            kind,
            op: None,
            endpoint: None,
            method: None,
            run_id: None,
            comparison_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add endpoint context
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Add method context
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add comparison ID context
    pub fn with_comparison_id(mut self, comparison_id: ComparisonId) -> Self {
        self.comparison_id = Some(comparison_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: DriftError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> DriftErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the endpoint context, if any
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Get the method context, if any
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the comparison ID context, if any
    pub fn comparison_id(&self) -> Option<&ComparisonId> {
        self.comparison_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&DriftError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for DriftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(endpoint) = &self.endpoint {
            write!(f, " (endpoint: {})", endpoint)?;
        }
        if let Some(method) = &self.method {
            write!(f, " (method: {})", method)?;
        }
        Ok(())
    }
}

impl std::error::Error for DriftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            DriftErrorKind::UnsupportedMethod.code(),
            "ERR_UNSUPPORTED_METHOD"
        );
        assert_eq!(DriftErrorKind::Timeout.code(), "ERR_TIMEOUT");
    }

    #[test]
    fn test_display_includes_context() {
        let err = DriftError::new(DriftErrorKind::UnsupportedMethod)
            .with_op("compare")
            .with_message("method PATCH is not supported")
            .with_endpoint("/items")
            .with_method("PATCH");
        let rendered = err.to_string();
        assert!(rendered.contains("ERR_UNSUPPORTED_METHOD"));
        assert!(rendered.contains("compare"));
        assert!(rendered.contains("/items"));
        assert!(rendered.contains("PATCH"));
    }

    #[test]
    fn test_builder_accessors() {
        let inner = DriftError::new(DriftErrorKind::Timeout);
        let err = DriftError::new(DriftErrorKind::ExternalService)
            .with_message("upstream failed")
            .with_source(inner);
        assert_eq!(err.kind(), DriftErrorKind::ExternalService);
        assert_eq!(err.message(), "upstream failed");
        assert_eq!(
            err.source_error().map(|s| s.kind()),
            Some(DriftErrorKind::Timeout)
        );
    }

    #[test]
    fn test_correlation_context_is_carried() {
        let run_id = RunId::new();
        let comparison_id = ComparisonId::new();
        let err = DriftError::new(DriftErrorKind::InvalidBaseUrl)
            .with_run_id(run_id.clone())
            .with_comparison_id(comparison_id.clone());
        assert_eq!(err.run_id(), Some(&run_id));
        assert_eq!(err.comparison_id(), Some(&comparison_id));
    }
}
