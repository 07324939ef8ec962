use std::borrow::Cow;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClientError;

/// Content type assumed when none is declared.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Opaque request or response body with a declared content type.
///
/// The client never parses or validates the bytes; schema enforcement belongs
/// to the catalog service. Cloning is cheap, the bytes are reference counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    bytes: Bytes,
    content_type: Cow<'static, str>,
}

impl Payload {
    /// Wraps raw bytes with an explicit content type.
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<Cow<'static, str>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// Wraps bytes that are already JSON encoded.
    pub fn json_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, JSON_CONTENT_TYPE)
    }

    /// Serializes `value` as a JSON payload.
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        Ok(Self::json_bytes(serde_json::to_vec(value)?))
    }

    /// A zero-length JSON payload, used for no-content responses.
    pub fn empty() -> Self {
        Self::json_bytes(Bytes::new())
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Deserializes the payload into `T`.
    ///
    /// This is a caller-side convenience; nothing on the request or response
    /// path calls it.
    pub fn to_json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.bytes)?)
    }

    /// Deserializes the payload into a [`Value`], mapping an empty body to
    /// [`Value::Null`].
    pub fn to_value(&self) -> Result<Value, ClientError> {
        if self.bytes.iter().all(u8::is_ascii_whitespace) {
            Ok(Value::Null)
        } else {
            self.to_json()
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        // Serializing a `Value` into memory cannot fail.
        Self::json_bytes(value.to_string().into_bytes())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::json_bytes(bytes)
    }
}

impl From<&'static str> for Payload {
    fn from(raw: &'static str) -> Self {
        Self::json_bytes(Bytes::from_static(raw.as_bytes()))
    }
}
