use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `key=value` slot as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Both halves present. Whitespace counts as present.
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }

    /// Parses `key=value`, splitting on the first `=`.
    /// A missing `=` yields an empty value.
    pub fn parse(text: &str) -> Self {
        match text.split_once('=') {
            Some((key, value)) => Self::new(key, value),
            None => Self::new(text, ""),
        }
    }
}

/// One data point as collected from the form. Built per submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub measurement: String,
    #[serde(default)]
    pub tags: Vec<Pair>,
    pub fields: Vec<Pair>,
}

impl Record {
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Pair::new(key, value));
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Pair::new(key, value));
        self
    }
}

/// Encoded wire text for one record. Only produced by [`crate::protocol::encode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedLine(String);

impl EncodedLine {
    pub(crate) fn new(line: String) -> Self {
        Self(line)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
