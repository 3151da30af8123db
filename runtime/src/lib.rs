//! # Checklist Runtime
//!
//! Runtime implementation for the Checklist architecture.
//!
//! This crate provides the [`Store`] that coordinates reducer execution and
//! effect handling for a single owner on a single thread.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer, executes effects
//! - **Feedback loop**: `Effect::Send` actions are reduced immediately, depth-first
//! - **Observers**: state snapshots over a `watch` channel, produced actions
//!   over a `broadcast` channel
//!
//! ## Example
//!
//! ```ignore
//! use checklist_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//! let mut snapshots = store.subscribe_state();
//!
//! // Send an action; the returned vector holds every action fed back by effects
//! let produced = store.send(Action::DoSomething)?;
//!
//! assert!(snapshots.has_changed()?);
//! let value = store.state().some_field;
//! ```

use checklist_core::{effect::Effect, reducer::Reducer};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept feeding actions back past the configured depth
        ///
        /// State changes applied before the limit was hit are kept and
        /// published; the remaining effects are dropped.
        #[error("Effect feedback exceeded the maximum depth of {limit}")]
        FeedbackDepthExceeded {
            /// The configured `max_feedback_depth`
            limit: usize,
        },
    }
}

pub use error::StoreError;
pub use store::{Store, StoreConfig};

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{Effect, Reducer, StoreError};
    use std::fmt::Debug;
    use tokio::sync::{broadcast, watch};

    /// Tunables for a [`Store`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StoreConfig {
        /// How many nested `Effect::Send` hops a single `send` may take
        pub max_feedback_depth: usize,
        /// Number of produced actions buffered for slow action observers
        pub broadcast_capacity: usize,
    }

    impl StoreConfig {
        /// Default feedback depth
        pub const DEFAULT_MAX_FEEDBACK_DEPTH: usize = 16;
        /// Default action broadcast capacity
        pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

        /// Set the maximum feedback depth
        #[must_use]
        pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
            self.max_feedback_depth = depth;
            self
        }
    }

    impl Default for StoreConfig {
        fn default() -> Self {
            Self {
                max_feedback_depth: Self::DEFAULT_MAX_FEEDBACK_DEPTH,
                broadcast_capacity: Self::DEFAULT_BROADCAST_CAPACITY,
            }
        }
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned; mutated only through [`Store::send`])
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// It is single-owner: mutation takes `&mut self`, so there is no lock.
    /// Observers hold channel receivers instead of references to the store.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        /// Latest state snapshot, republished after every `send`.
        state_tx: watch::Sender<S>,
        /// Every action produced by effects, in the order it was reduced.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
        A: Clone + Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (state_tx, _) = watch::channel(initial_state.clone());
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                state_tx,
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// The action is reduced, then its effects run depth-first: every
        /// `Effect::Send` action is broadcast to action observers and reduced
        /// before the next sibling effect runs. When the loop settles the new
        /// state is published to state observers.
        ///
        /// # Returns
        ///
        /// Every action produced by effects, in the order it was reduced.
        /// The initial action is not included.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackDepthExceeded`] if effects keep
        /// sending actions deeper than `max_feedback_depth`. The state is still
        /// published in that case.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<Vec<A>, StoreError> {
            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let mut produced = Vec::new();
            let effects = self.reducer.reduce(&mut self.state, action, &self.environment);

            // Note: Precision loss acceptable for metrics (effect counts < 2^52)
            #[allow(clippy::cast_precision_loss)]
            metrics::histogram!("store.effects.count").record(effects.len() as f64);

            let mut outcome = Ok(());
            for effect in effects {
                outcome = self.execute_effect(effect, 1, &mut produced);
                if outcome.is_err() {
                    break;
                }
            }

            self.state_tx.send_replace(self.state.clone());
            tracing::trace!(produced = produced.len(), "Action processing completed");

            outcome.map(|()| produced)
        }

        fn execute_effect(
            &mut self,
            effect: Effect<A>,
            depth: usize,
            produced: &mut Vec<A>,
        ) -> Result<(), StoreError> {
            match effect {
                Effect::None => Ok(()),
                Effect::Sequential(effects) => {
                    tracing::trace!(count = effects.len(), "Executing sequential effects");
                    for effect in effects {
                        self.execute_effect(effect, depth, produced)?;
                    }
                    Ok(())
                },
                Effect::Send(action) => {
                    if depth > self.config.max_feedback_depth {
                        tracing::warn!(
                            limit = self.config.max_feedback_depth,
                            ?action,
                            "Dropping action: feedback depth exceeded"
                        );
                        metrics::counter!("store.feedback.depth_exceeded").increment(1);
                        return Err(StoreError::FeedbackDepthExceeded {
                            limit: self.config.max_feedback_depth,
                        });
                    }

                    let action = *action;
                    tracing::trace!(?action, depth, "Feeding action back into reducer");

                    // No receivers is fine; observers are optional
                    let _ = self.action_broadcast.send(action.clone());
                    produced.push(action.clone());

                    let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                    for effect in effects {
                        self.execute_effect(effect, depth + 1, produced)?;
                    }
                    Ok(())
                },
            }
        }

        /// Read current state
        #[must_use]
        pub const fn state(&self) -> &S {
            &self.state
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Subscribe to state snapshots
        ///
        /// The receiver starts out holding the current state (marked as seen)
        /// and is updated after every [`Store::send`], even when the action
        /// changed nothing.
        #[must_use]
        pub fn subscribe_state(&self) -> watch::Receiver<S> {
            self.state_tx.subscribe()
        }

        /// Subscribe to actions produced by effects
        ///
        /// - Only actions fed back by effects are broadcast (not the actions
        ///   passed to `send`)
        /// - A slow receiver that falls more than `broadcast_capacity` actions
        ///   behind sees `TryRecvError::Lagged`
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use checklist_core::{SmallVec, smallvec};
    use tokio::sync::broadcast::error::TryRecvError;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestState {
        value: i32,
        log: Vec<&'static str>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Incremented,
        Decremented,
        NoOp,
        ProduceSequentialEffects,
        Loop,
    }

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => smallvec![Effect::send(TestAction::Incremented)],
                TestAction::Incremented => {
                    state.value += 1;
                    state.log.push("incremented");
                    SmallVec::new()
                },
                TestAction::Decremented => {
                    state.value -= 1;
                    state.log.push("decremented");
                    SmallVec::new()
                },
                TestAction::NoOp => smallvec![Effect::None],
                TestAction::ProduceSequentialEffects => smallvec![Effect::chain(vec![
                    Effect::send(TestAction::Incremented),
                    Effect::send(TestAction::Incremented),
                    Effect::send(TestAction::Decremented),
                ])],
                TestAction::Loop => smallvec![Effect::send(TestAction::Loop)],
            }
        }
    }

    fn store() -> Store<TestState, TestAction, (), TestReducer> {
        Store::new(TestState::default(), TestReducer, ())
    }

    #[test]
    fn test_store_creation() {
        let store = store();
        assert_eq!(store.state().value, 0);
        assert_eq!(store.config(), StoreConfig::default());
    }

    #[test]
    fn test_send_returns_produced_actions() {
        let mut store = store();

        let produced = store.send(TestAction::Increment).unwrap();

        assert_eq!(produced, vec![TestAction::Incremented]);
        assert_eq!(store.state().value, 1);
    }

    #[test]
    fn test_effect_none_produces_nothing() {
        let mut store = store();

        let produced = store.send(TestAction::NoOp).unwrap();

        assert!(produced.is_empty());
        assert_eq!(store.state(), &TestState::default());
    }

    #[test]
    fn test_effect_sequential_runs_in_order() {
        let mut store = store();

        let produced = store.send(TestAction::ProduceSequentialEffects).unwrap();

        assert_eq!(produced.len(), 3);
        // Net result: +1 +1 -1 = 1
        assert_eq!(store.state().value, 1);
        assert_eq!(store.state().log, vec!["incremented", "incremented", "decremented"]);
    }

    #[test]
    fn test_state_observer_sees_every_send() {
        let mut store = store();
        let mut rx = store.subscribe_state();
        assert!(!rx.has_changed().unwrap());

        store.send(TestAction::Increment).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 1);

        store.send(TestAction::NoOp).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 1);
    }

    #[test]
    fn test_action_observer_sees_only_produced_actions() {
        let mut store = store();
        let mut rx = store.subscribe_actions();

        store.send(TestAction::Increment).unwrap();

        assert_eq!(rx.try_recv().unwrap(), TestAction::Incremented);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_send_without_observers() {
        let mut store = store();
        // No receivers exist; broadcasting must not fail the send
        assert!(store.send(TestAction::Increment).is_ok());
    }

    #[test]
    fn test_feedback_depth_is_bounded() {
        let config = StoreConfig::default().with_max_feedback_depth(3);
        let mut store = Store::with_config(TestState::default(), TestReducer, (), config);
        let mut rx = store.subscribe_state();

        let result = store.send(TestAction::Loop);

        assert_eq!(result, Err(StoreError::FeedbackDepthExceeded { limit: 3 }));
        // State is still published after a failed send
        assert!(rx.has_changed().unwrap());
    }
}
