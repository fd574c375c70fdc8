//! A todo list state container built on the todo store runtime.
//!
//! The list is an ordered collection of todos with unique ids. It changes only
//! through three intents, each applied by the pure [`transition`] function:
//!
//! - `CREATE { text }` appends an open todo with id `max + 1` (or 1)
//! - `TOGGLE { id }` flips one todo's completion flag
//! - `REMOVE { id }` deletes one todo
//!
//! Unknown ids are ignored. Unknown intent tags are rejected when decoding
//! the tagged JSON form, before anything is applied.
//!
//! # Quick Start
//!
//! ```
//! use todos::{Intent, TodoCollection, TodoReducer, TodoStore};
//!
//! let store = TodoStore::new(TodoCollection::seed(), TodoReducer::new());
//!
//! store.send(Intent::create("Write the release notes"));
//! store.send(Intent::toggle(3));
//! store.send(Intent::remove(1));
//!
//! let (total, done) = store.state(|todos| (todos.len(), todos.completed_count()));
//! assert_eq!((total, done), (3, 2));
//!
//! assert!(store.try_send(r#"{"type":"UNKNOWN"}"#).is_err());
//! ```

pub mod cli;
pub mod config;
pub mod intent;
pub mod reducer;
pub mod types;

use todostore_runtime::Store;

// Re-export commonly used types
pub use config::{Config, ConfigError, SeedMode};
pub use intent::{Intent, IntentError};
pub use reducer::{TodoReducer, next_id, transition, transition_tagged};
pub use types::{CollectionError, Todo, TodoCollection, TodoId};

/// Store holding a todo list
pub type TodoStore = Store<TodoCollection, Intent, TodoReducer>;

/// Creates a store holding the sample todos
#[must_use]
pub fn seeded_store() -> TodoStore {
    TodoStore::new(TodoCollection::seed(), TodoReducer::new())
}
