use serde::{Deserialize, Serialize};
use std::fmt;

/// A single todo entry.
///
/// Items are identified by an opaque string id assigned once at creation
/// (see [`TodoStore::add`](crate::store::TodoStore::add)). The id never
/// changes for the lifetime of the item, so frontends can hold onto it
/// across edits and completion toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// Creates an item that is not yet completed.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }
}

impl fmt::Display for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "[{}] {}", mark, self.text)
    }
}
