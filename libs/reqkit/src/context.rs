//! Execution-context metadata carried in [`http::Extensions`].
//!
//! Each request's ambient state (deadline, trace identifier) rides on the
//! request itself as typed extension values. The types below are the keys:
//! only code that names them can read or write the values, which keeps the
//! metadata opaque to everything else in the chain. Cancellation needs no
//! carrier of its own; dropping the request future aborts the in-flight call.

use std::fmt;
use std::time::Instant;

/// Absolute deadline for a request.
///
/// Installed by [`TimeoutLayer`](crate::layers::TimeoutLayer) (or seeded by
/// the caller via [`RequestBuilder::deadline`](crate::RequestBuilder::deadline))
/// and enforced by the context-aware base transport. Decorators may only
/// tighten it, never loosen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(pub Instant);

impl Deadline {
    /// The instant at which the request must have completed.
    #[must_use]
    pub fn instant(self) -> Instant {
        self.0
    }
}

/// Trace identifier bound by the trace decorator for downstream consumers
/// (e.g. the logging decorator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    /// Wrap a hex trace identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn extensions_round_trip() {
        let mut ext = http::Extensions::new();
        let at = Instant::now() + Duration::from_secs(1);

        ext.insert(Deadline(at));
        ext.insert(TraceId::new("4bf92f3577b34da6a3ce929d0e0e4736"));

        assert_eq!(ext.get::<Deadline>(), Some(&Deadline(at)));
        assert_eq!(
            ext.get::<TraceId>().map(TraceId::as_str),
            Some("4bf92f3577b34da6a3ce929d0e0e4736")
        );
    }

    #[test]
    fn deadline_ordering() {
        let now = Instant::now();
        let sooner = Deadline(now);
        let later = Deadline(now + Duration::from_millis(10));
        assert!(sooner < later);
    }
}
