//! Logical operations and their outcomes.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A logical request: method, path and optional JSON body.
///
/// Carries no endpoint; the dispatcher decides where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    method: Method,
    path: String,
    body: Option<Value>,
}

impl OperationDescriptor {
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Response body was empty
    Empty,
    /// Response body parsed as JSON
    Parsed(Value),
}

impl DispatchOutcome {
    /// Parse a response body; empty or whitespace-only bodies yield `Empty`.
    ///
    /// ```
    /// use notedeck::dispatch::DispatchOutcome;
    ///
    /// assert_eq!(DispatchOutcome::parse("").unwrap(), DispatchOutcome::Empty);
    /// assert!(DispatchOutcome::parse(r#"{"id": 1}"#).unwrap().is_parsed());
    /// assert!(DispatchOutcome::parse("<html>").is_err());
    /// ```
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(DispatchOutcome::Empty);
        }
        serde_json::from_str(body).map(DispatchOutcome::Parsed)
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, DispatchOutcome::Parsed(_))
    }

    /// JSON view of the outcome; `Empty` becomes an empty object.
    pub fn into_value(self) -> Value {
        match self {
            DispatchOutcome::Empty => Value::Object(Default::default()),
            DispatchOutcome::Parsed(value) => value,
        }
    }

    /// Deserialize the parsed body, or `None` when the body was empty.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Option<T>, serde_json::Error> {
        match self {
            DispatchOutcome::Empty => Ok(None),
            DispatchOutcome::Parsed(value) => serde_json::from_value(value).map(Some),
        }
    }
}
