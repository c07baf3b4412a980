use crate::error::BoxError;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Reversible mapping between a structured value and a byte payload.
///
/// A codec encodes the request body and decodes the response body. It is
/// stateless: `encode` is deterministic and `decode` tolerates any byte
/// slice (malformed input is an error, not a panic).
///
/// The request builder carries its codec as a type parameter
/// ([`RequestBuilder<C>`](crate::RequestBuilder)), so swapping codecs is a
/// compile-time rebind rather than dynamic dispatch.
pub trait Codec: Send {
    /// Serialize `value` into its canonical byte representation.
    ///
    /// # Errors
    /// Returns an error when the value contains non-serializable data.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, BoxError>;

    /// Deserialize `body` into a `T`.
    ///
    /// # Errors
    /// Returns an error on malformed input or a structural mismatch with `T`.
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, BoxError>;

    /// Content type advertised for bodies produced by [`encode`](Codec::encode).
    fn content_type(&self) -> &'static str;
}

/// Default codec: JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Codec for Json {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, BoxError> {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, BoxError> {
        Ok(serde_json::from_slice(body)?)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
