//! # Todo Store Core
//!
//! The reducer abstraction that every state container in this workspace is
//! built on.
//!
//! ## Core Concepts
//!
//! - **State**: Owned domain state for a feature
//! - **Action**: All possible inputs (intents) to a reducer
//! - **Reducer**: Pure function `(&State, Action) → State`
//!
//! A reducer never mutates the state it is handed. It returns the next state
//! as a new value, and the runtime decides when to install it.
//!
//! ## Example
//!
//! ```
//! use todostore_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Tally(u32);
//!
//! enum TallyAction {
//!     Bump,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!
//!     fn reduce(&self, state: &Tally, action: TallyAction) -> Tally {
//!         match action {
//!             TallyAction::Bump => Tally(state.0 + 1),
//!         }
//!     }
//! }
//!
//! let before = Tally(1);
//! let after = TallyReducer.reduce(&before, TallyAction::Bump);
//! assert_eq!(before, Tally(1));
//! assert_eq!(after, Tally(2));
//! ```

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(&State, Action) → State`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    ///
    /// # Purity
    ///
    /// `reduce` receives the current state by shared reference and must not
    /// reach around that (interior mutability, globals, I/O). Given the same
    /// state and action it must always return the same next state.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Compute the next state for an action
        ///
        /// # Arguments
        ///
        /// - `state`: The current state, left untouched
        /// - `action`: The action to process
        ///
        /// # Returns
        ///
        /// The next state
        fn reduce(&self, state: &Self::State, action: Self::Action) -> Self::State;
    }

    impl<R: Reducer + ?Sized> Reducer for &R {
        type State = R::State;
        type Action = R::Action;

        fn reduce(&self, state: &Self::State, action: Self::Action) -> Self::State {
            (**self).reduce(state, action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::reducer::Reducer;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Names(Vec<String>);

    enum NamesAction {
        Push(String),
        Clear,
    }

    struct NamesReducer;

    impl Reducer for NamesReducer {
        type State = Names;
        type Action = NamesAction;

        fn reduce(&self, state: &Names, action: NamesAction) -> Names {
            match action {
                NamesAction::Push(name) => {
                    let mut next = state.0.clone();
                    next.push(name);
                    Names(next)
                },
                NamesAction::Clear => Names(Vec::new()),
            }
        }
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let before = Names(vec!["a".to_string()]);
        let after = NamesReducer.reduce(&before, NamesAction::Push("b".to_string()));

        assert_eq!(before, Names(vec!["a".to_string()]));
        assert_eq!(after, Names(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn reducer_by_reference() {
        let reducer = &NamesReducer;
        let after = reducer.reduce(&Names(vec!["x".to_string()]), NamesAction::Clear);
        assert!(after.0.is_empty());
    }
}
