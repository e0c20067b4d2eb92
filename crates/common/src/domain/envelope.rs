use std::fmt;

/// Inbound request payload paired with the caller's correlation id.
///
/// The correlation id is opaque: it is forwarded to collaborators and logs but
/// never parsed. The payload may be absent, which every consumer handles as a
/// skipped dispatch rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithCorrelationId<T> {
    pub correlation_id: String,
    pub value: Option<T>,
}

impl<T> WithCorrelationId<T> {
    pub fn new(correlation_id: impl Into<String>, value: T) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            value: Some(value),
        }
    }

    /// Envelope carrying only a correlation id
    pub fn empty(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            value: None,
        }
    }
}

/// Why a dispatch returned without calling any collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The envelope carried no payload
    MissingRequest,
    /// None of the selector fields were populated; names the precondition
    MissingSelector(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRequest => write!(f, "request is missing"),
            SkipReason::MissingSelector(name) => write!(f, "{} is missing", name),
        }
    }
}

/// Outcome of a correlation-scoped dispatch.
///
/// `Skipped` is a logged no-op, not a fault. Collaborator failures travel
/// separately as `DomainError`.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult<T> {
    Success(T),
    Skipped(SkipReason),
}

impl<T> DispatchResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Success(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            DispatchResult::Success(value) => Some(value),
            DispatchResult::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            DispatchResult::Success(_) => None,
            DispatchResult::Skipped(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DispatchResult<U> {
        match self {
            DispatchResult::Success(value) => DispatchResult::Success(f(value)),
            DispatchResult::Skipped(reason) => DispatchResult::Skipped(reason),
        }
    }
}

impl<T: Default> DispatchResult<T> {
    /// Payload of a successful dispatch, or the empty payload when skipped
    pub fn into_value(self) -> T {
        match self {
            DispatchResult::Success(value) => value,
            DispatchResult::Skipped(_) => T::default(),
        }
    }
}
