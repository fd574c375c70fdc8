//! # Todo Store Runtime
//!
//! The Store that owns reducer state and coordinates dispatch.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current state, applies actions through the reducer
//!   and notifies observers
//! - **StoreConfig**: Tunables for the observer channels
//! - **metrics**: Metric names and the Prometheus recorder
//!
//! ## Example
//!
//! ```ignore
//! use todostore_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer);
//!
//! // Send an action
//! store.send(Action::DoSomething);
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use std::sync::Arc;
use todostore_core::reducer::Reducer;
use tokio::sync::{broadcast, watch};

/// Metric names and the Prometheus recorder
pub mod metrics;

/// Default capacity of the action broadcast channel
pub const DEFAULT_ACTION_BROADCAST_CAPACITY: usize = 16;

/// Store configuration
///
/// # Example
///
/// ```
/// use todostore_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_action_broadcast_capacity(64);
/// assert_eq!(config.action_broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of applied actions buffered for each action observer
    ///
    /// Observers that fall further behind than this miss the oldest actions
    /// (`RecvError::Lagged`). A value of zero is raised to one.
    pub action_broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(action_broadcast_capacity: usize) -> Self {
        Self {
            action_broadcast_capacity,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_action_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.action_broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ACTION_BROADCAST_CAPACITY)
    }
}

/// The Store and its handle semantics
pub mod store {
    use super::{Arc, Reducer, StoreConfig, broadcast, metrics, watch};
    use std::time::Instant;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (inside a `watch` channel so observers see every new value)
    /// 2. Reducer (business logic)
    /// 3. Action broadcast (observers of applied actions)
    ///
    /// A `Store` is a handle: cloning it is cheap and every clone refers to
    /// the same state. Pass it explicitly to whatever needs to dispatch or
    /// read.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
    {
        state: Arc<watch::Sender<S>>,
        reducer: Arc<R>,
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, R> Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
        A: Clone,
    {
        /// Create a new store with initial state and reducer
        ///
        /// Uses [`StoreConfig::default()`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R) -> Self {
            Self::with_config(initial_state, reducer, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, config: StoreConfig) -> Self {
            let (state, _) = watch::channel(initial_state);
            let (action_broadcast, _) =
                broadcast::channel(config.action_broadcast_capacity.max(1));

            Self {
                state: Arc::new(state),
                reducer: Arc::new(reducer),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Takes the write guard on the state channel
        /// 2. Calls the reducer with the current state and the action
        /// 3. Installs the returned state and wakes state observers
        /// 4. Broadcasts the action to action observers
        ///
        /// Sends are applied one at a time in the order they are issued;
        /// readers never see a partially applied action.
        ///
        /// # Deadlocks
        ///
        /// Do not call `send` from inside a [`Store::state`] closure or while
        /// holding a borrow from a [`watch::Receiver`] returned by
        /// [`Store::subscribe`].
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&self, action: A) {
            tracing::debug!("Processing action");
            metrics::counter!(metrics::STORE_ACTIONS_TOTAL).increment(1);

            let observed = action.clone();
            self.state.send_modify(|state| {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = Instant::now();
                let next = self.reducer.reduce(state, action);
                *state = next;
                metrics::histogram!(metrics::STORE_REDUCER_DURATION_SECONDS)
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed");
            });

            if self.action_broadcast.send(observed).is_err() {
                tracing::trace!("No action observers");
            }
        }

        /// Decode an untyped input into an action and send it
        ///
        /// The state is untouched when decoding fails.
        ///
        /// # Errors
        ///
        /// Returns the decoding error of `A: TryFrom<T>`. Callers treat it as
        /// a contract violation by whoever produced the input.
        #[tracing::instrument(skip(self, input), name = "store_try_send")]
        pub fn try_send<T>(&self, input: T) -> Result<(), <A as TryFrom<T>>::Error>
        where
            A: TryFrom<T>,
            <A as TryFrom<T>>::Error: std::fmt::Display,
        {
            match A::try_from(input) {
                Ok(action) => {
                    self.send(action);
                    Ok(())
                },
                Err(error) => {
                    tracing::error!(%error, "Rejected action");
                    metrics::counter!(metrics::STORE_ACTIONS_REJECTED_TOTAL).increment(1);
                    Err(error)
                },
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.borrow();
            f(&state)
        }

        /// Clone the current state out of the store
        #[must_use]
        pub fn snapshot(&self) -> S
        where
            S: Clone,
        {
            self.state.borrow().clone()
        }

        /// Subscribe to state changes
        ///
        /// The receiver starts with the current state marked as seen;
        /// `changed().await` resolves after the next [`Store::send`].
        /// Intermediate states may be skipped by slow observers, the latest
        /// one is always visible.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.state.subscribe()
        }

        /// Subscribe to applied actions
        ///
        /// Every action passed to [`Store::send`] (and every successfully
        /// decoded [`Store::try_send`] input) is delivered after the state has
        /// been updated.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Number of live state subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.state.receiver_count()
        }
    }

    impl<S, A, R> Clone for Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, R> std::fmt::Debug for Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &*self.state.borrow())
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use store::Store;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
    }

    impl TryFrom<&str> for TestAction {
        type Error = String;

        fn try_from(tag: &str) -> Result<Self, Self::Error> {
            match tag {
                "inc" => Ok(Self::Increment),
                "dec" => Ok(Self::Decrement),
                "noop" => Ok(Self::NoOp),
                other => Err(format!("unhandled tag {other}")),
            }
        }
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;

        fn reduce(&self, state: &TestState, action: TestAction) -> TestState {
            match action {
                TestAction::Increment => TestState {
                    value: state.value + 1,
                },
                TestAction::Decrement => TestState {
                    value: state.value - 1,
                },
                TestAction::NoOp => state.clone(),
            }
        }
    }

    #[test]
    fn test_store_send() {
        let store = Store::new(TestState { value: 0 }, TestReducer);

        store.send(TestAction::Increment);
        store.send(TestAction::Increment);
        store.send(TestAction::Decrement);

        assert_eq!(store.state(|s| s.value), 1);
    }

    #[test]
    fn test_store_noop_keeps_state() {
        let store = Store::new(TestState { value: 7 }, TestReducer);
        store.send(TestAction::NoOp);
        assert_eq!(store.snapshot(), TestState { value: 7 });
    }

    #[test]
    fn test_try_send_decodes() {
        let store = Store::new(TestState { value: 0 }, TestReducer);

        assert!(store.try_send("inc").is_ok());
        assert_eq!(store.state(|s| s.value), 1);
    }

    #[test]
    fn test_try_send_rejects_without_touching_state() {
        let store = Store::new(TestState { value: 3 }, TestReducer);

        let error = store.try_send("explode").unwrap_err();

        assert_eq!(error, "unhandled tag explode");
        assert_eq!(store.state(|s| s.value), 3);
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new(TestState { value: 0 }, TestReducer);
        let handle = store.clone();

        handle.send(TestAction::Increment);

        assert_eq!(store.state(|s| s.value), 1);
    }

    #[test]
    fn test_separate_stores_are_isolated() {
        let store1 = Store::new(TestState { value: 0 }, TestReducer);
        let store2 = Store::new(TestState { value: 0 }, TestReducer);

        store1.send(TestAction::Increment);
        store1.send(TestAction::Increment);
        store2.send(TestAction::Decrement);

        assert_eq!(store1.state(|s| s.value), 2);
        assert_eq!(store2.state(|s| s.value), -1);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let store = Store::with_config(
            TestState { value: 0 },
            TestReducer,
            StoreConfig::default().with_action_broadcast_capacity(0),
        );
        let mut actions = store.subscribe_actions();

        store.send(TestAction::Increment);

        assert_eq!(actions.try_recv().unwrap(), TestAction::Increment);
    }

    #[test]
    fn test_subscriber_count() {
        let store = Store::new(TestState { value: 0 }, TestReducer);
        assert_eq!(store.subscriber_count(), 0);

        let rx = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        drop(rx);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_store_config_default() {
        assert_eq!(
            StoreConfig::default().action_broadcast_capacity,
            DEFAULT_ACTION_BROADCAST_CAPACITY
        );
    }
}
