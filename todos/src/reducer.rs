//! Reducer logic for the todo list.
//!
//! [`transition`] is the whole state machine: it computes the next
//! collection from the current one and an intent without touching its input.
//! TOGGLE and REMOVE on an id that is not in the list are no-ops, not errors.

use crate::intent::{Intent, IntentError};
use crate::types::{Todo, TodoCollection, TodoId};
use serde_json::Value;
use std::collections::HashSet;
use todostore_core::reducer::Reducer;

/// Id for the next created todo: one past the largest id, or
/// [`TodoId::FIRST`] for an empty list
///
/// Computed from the collection on every call. If the largest id is
/// `u64::MAX` the smallest unused id is returned instead.
#[must_use]
pub fn next_id(todos: &TodoCollection) -> TodoId {
    match todos.max_id() {
        None => TodoId::FIRST,
        Some(max) => max.next().unwrap_or_else(|| smallest_unused_id(todos)),
    }
}

fn smallest_unused_id(todos: &TodoCollection) -> TodoId {
    let used: HashSet<TodoId> = todos.ids().collect();
    (1..=u64::MAX)
        .map(TodoId::new)
        .find(|id| !used.contains(id))
        .unwrap_or(TodoId::FIRST)
}

/// Computes the collection that results from applying `intent` to `current`
#[must_use]
pub fn transition(current: &TodoCollection, intent: Intent) -> TodoCollection {
    tracing::trace!(tag = intent.tag(), len = current.len(), "Applying intent");

    match intent {
        Intent::Create { text } => {
            let id = next_id(current);
            let todos = current
                .iter()
                .cloned()
                .chain(std::iter::once(Todo::new(id, text, false)))
                .collect();
            TodoCollection::from_unchecked(todos)
        },

        Intent::Toggle { id } => {
            if !current.contains(id) {
                tracing::debug!(%id, "Toggle for unknown todo ignored");
                return current.clone();
            }
            let todos = current
                .iter()
                .map(|todo| if todo.id() == id { todo.toggled() } else { todo.clone() })
                .collect();
            TodoCollection::from_unchecked(todos)
        },

        Intent::Remove { id } => {
            if !current.contains(id) {
                tracing::debug!(%id, "Remove for unknown todo ignored");
                return current.clone();
            }
            let todos = current
                .iter()
                .filter(|todo| todo.id() != id)
                .cloned()
                .collect();
            TodoCollection::from_unchecked(todos)
        },
    }
}

/// Decodes a tagged intent and applies it
///
/// # Errors
///
/// Returns the [`IntentError`] from [`Intent::from_value`]; `current` is not
/// consulted in that case.
pub fn transition_tagged(
    current: &TodoCollection,
    intent: &Value,
) -> Result<TodoCollection, IntentError> {
    let intent = Intent::from_value(intent)?;
    Ok(transition(current, intent))
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoCollection;
    type Action = Intent;

    fn reduce(&self, state: &Self::State, action: Self::Action) -> Self::State {
        transition(state, action)
    }
}
