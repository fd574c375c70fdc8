//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of todo items with unique ids. Items
//! are never edited in place: toggling produces a new [`Todo`], and every
//! intent produces a new [`TodoCollection`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Id given to the first todo of an empty list
    pub const FIRST: Self = Self(1);

    /// Creates a `TodoId` from its integer value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the integer value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id after this one, or `None` at `u64::MAX`
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// Fields are read-only; [`Todo::toggled`] returns the flipped copy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    text: String,
    done: bool,
}

impl Todo {
    /// Creates a new todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, done: bool) -> Self {
        Self { id, text, done }
    }

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Description of the todo
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the todo is completed
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns a copy with `done` negated
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            id: self.id,
            text: self.text.clone(),
            done: !self.done,
        }
    }
}

/// Errors from building a collection out of arbitrary items
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Two items share an id
    #[error("Duplicate todo id {0}")]
    DuplicateId(TodoId),
}

/// Sample todos the store starts with
const SEED: [(u64, &str, bool); 3] = [
    (1, "Context API 배우기", true),
    (2, "TypeScript API 배우기", true),
    (3, "TypeScript 와 Context API 배우기", false),
];

/// Ordered collection of todos with pairwise distinct ids
///
/// Insertion order is display order. Serializes as a JSON array; deserializing
/// rejects duplicate ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Todo>", into = "Vec<Todo>")]
pub struct TodoCollection {
    todos: Vec<Todo>,
}

impl TodoCollection {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// The three sample todos: ids 1 and 2 done, id 3 open
    #[must_use]
    pub fn seed() -> Self {
        Self::from_unchecked(
            SEED.iter()
                .map(|&(id, text, done)| Todo::new(TodoId::new(id), text.to_string(), done))
                .collect(),
        )
    }

    /// Builds a collection from items in display order
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] for the first id that appears
    /// twice.
    pub fn from_todos(todos: Vec<Todo>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(todos.len());
        if let Some(duplicate) = todos.iter().map(Todo::id).find(|id| !seen.insert(*id)) {
            return Err(CollectionError::DuplicateId(duplicate));
        }
        Ok(Self { todos })
    }

    /// Caller guarantees the ids are distinct
    pub(crate) const fn from_unchecked(todos: Vec<Todo>) -> Self {
        Self { todos }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_done()).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id() == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id in the collection
    #[must_use]
    pub fn max_id(&self) -> Option<TodoId> {
        self.todos.iter().map(Todo::id).max()
    }

    /// Ids in display order
    pub fn ids(&self) -> impl Iterator<Item = TodoId> + '_ {
        self.todos.iter().map(Todo::id)
    }

    /// Iterates todos in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    /// Todos in display order
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    /// The last todo, if any
    #[must_use]
    pub fn last(&self) -> Option<&Todo> {
        self.todos.last()
    }
}

impl TryFrom<Vec<Todo>> for TodoCollection {
    type Error = CollectionError;

    fn try_from(todos: Vec<Todo>) -> Result<Self, Self::Error> {
        Self::from_todos(todos)
    }
}

impl From<TodoCollection> for Vec<Todo> {
    fn from(collection: TodoCollection) -> Self {
        collection.todos
    }
}

impl<'a> IntoIterator for &'a TodoCollection {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}
