//! Intents: the requests that change a todo list.
//!
//! Typed callers build an [`Intent`] directly. Untyped callers hand over the
//! tagged JSON form, `{"type": "CREATE", "text": "..."}`,
//! `{"type": "TOGGLE", "id": 3}` or `{"type": "REMOVE", "id": 3}`, and decode
//! it with [`Intent::from_value`] or `str::parse`. A tag outside that set is a
//! programming error on the caller's side and is reported as
//! [`IntentError::Unhandled`]; it never reaches the reducer.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// A request to change the todo list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Intent {
    /// Append a new open todo
    Create {
        /// Description of the new todo
        text: String,
    },

    /// Flip the completion flag of a todo
    Toggle {
        /// Todo to flip
        id: TodoId,
    },

    /// Delete a todo
    Remove {
        /// Todo to delete
        id: TodoId,
    },
}

impl Intent {
    /// Every tag the decoder accepts
    pub const TAGS: [&'static str; 3] = ["CREATE", "TOGGLE", "REMOVE"];

    /// Builds a `CREATE` intent
    #[must_use]
    pub fn create(text: impl Into<String>) -> Self {
        Self::Create { text: text.into() }
    }

    /// Builds a `TOGGLE` intent
    #[must_use]
    pub fn toggle(id: impl Into<TodoId>) -> Self {
        Self::Toggle { id: id.into() }
    }

    /// Builds a `REMOVE` intent
    #[must_use]
    pub fn remove(id: impl Into<TodoId>) -> Self {
        Self::Remove { id: id.into() }
    }

    /// The wire tag of this intent
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Create { .. } => "CREATE",
            Self::Toggle { .. } => "TOGGLE",
            Self::Remove { .. } => "REMOVE",
        }
    }

    /// Decodes a tagged intent
    ///
    /// # Errors
    ///
    /// - [`IntentError::MissingTag`] if `value` has no string `type` field
    /// - [`IntentError::Unhandled`] if the tag is not one of [`Intent::TAGS`]
    /// - [`IntentError::Malformed`] if the fields do not fit the tag
    pub fn from_value(value: &Value) -> Result<Self, IntentError> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(IntentError::MissingTag)?;

        if !Self::TAGS.contains(&tag) {
            return Err(IntentError::Unhandled {
                tag: tag.to_string(),
            });
        }

        Self::deserialize(value).map_err(|source| IntentError::Malformed {
            tag: tag.to_string(),
            source,
        })
    }
}

/// Errors from decoding a tagged intent
#[derive(Error, Debug)]
pub enum IntentError {
    /// The payload is not JSON
    #[error("Intent is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The payload has no string `type` field
    #[error("Intent has no \"type\" tag")]
    MissingTag,

    /// The tag is not a known intent
    #[error("Unhandled intent: {tag}")]
    Unhandled {
        /// The unrecognized tag
        tag: String,
    },

    /// The tag is known but its fields are missing or ill-typed
    #[error("Malformed {tag} intent: {source}")]
    Malformed {
        /// The recognized tag
        tag: String,
        /// Field decoding error
        #[source]
        source: serde_json::Error,
    },
}

impl TryFrom<Value> for Intent {
    type Error = IntentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl TryFrom<&Value> for Intent {
    type Error = IntentError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s).map_err(IntentError::Json)?;
        Self::from_value(&value)
    }
}

impl TryFrom<&str> for Intent {
    type Error = IntentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
