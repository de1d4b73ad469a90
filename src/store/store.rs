use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::store::reducer::Reducer;

type Subscriber<S> = Box<dyn Fn(&S) + Send + Sync>;
type SubscriberMap<S> = HashMap<usize, Subscriber<S>>;

/// A thread-safe state container driven by a [`Reducer`].
///
/// Stores hold one state value and funnel every mutation through the
/// reducer's transition function: [`dispatch`](Store::dispatch) computes the
/// next state under the write lock and swaps it in as one atomic step, so
/// readers never observe a partially-applied update. Subscribers are handed
/// the fully-formed new snapshot after each transition.
///
/// Cloning a store clones the handle, not the state; all clones share the
/// same state and subscriber set.
pub struct Store<R: Reducer> {
    state: Arc<RwLock<R::State>>,
    subscribers: Arc<RwLock<SubscriberMap<R::State>>>,
    next_subscriber_id: Arc<AtomicUsize>,
}

impl<R: Reducer> Store<R> {
    /// Create a new store with the given initial state.
    pub fn new(initial: R::State) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            next_subscriber_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> R::State {
        self.state.read().unwrap().clone()
    }

    /// Read the state with a function without cloning.
    pub fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::State) -> T,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Apply an action through the reducer and notify subscribers.
    ///
    /// The transition is atomic: the write lock is held while the reducer
    /// runs and the new state is swapped in.
    pub fn dispatch(&self, action: R::Action) {
        {
            let mut state = self.state.write().unwrap();
            let next = R::reduce(state.clone(), action);
            *state = next;
        }
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every dispatched transition with the new
    /// state. It must not dispatch back into the same store synchronously.
    /// Dropping the returned guard removes the subscriber.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionGuard<R::State>
    where
        F: Fn(&R::State) + Send + Sync + 'static,
    {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::SeqCst);
        self.subscribers
            .write()
            .unwrap()
            .insert(id, Box::new(callback));

        SubscriptionGuard {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Notify all subscribers of a state change.
    fn notify(&self) {
        let state = self.state.read().unwrap();
        let subscribers = self.subscribers.read().unwrap();
        for subscriber in subscribers.values() {
            subscriber(&state);
        }
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            next_subscriber_id: Arc::clone(&self.next_subscriber_id),
        }
    }
}

/// RAII guard for store subscriptions.
///
/// The subscriber stays registered for as long as the guard lives.
#[must_use = "dropping the guard removes the subscriber"]
pub struct SubscriptionGuard<S> {
    id: usize,
    subscribers: Weak<RwLock<SubscriberMap<S>>>,
}

impl<S> Drop for SubscriptionGuard<S> {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            if let Ok(mut subscribers) = subscribers.write() {
                subscribers.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq, Default)]
    struct CounterState {
        count: i32,
        history: Vec<i32>,
    }

    enum CounterAction {
        Add(i32),
        Reset,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;

        fn reduce(state: CounterState, action: CounterAction) -> CounterState {
            match action {
                CounterAction::Add(n) => {
                    let count = state.count + n;
                    let mut history = state.history;
                    history.push(count);
                    CounterState { count, history }
                }
                CounterAction::Reset => CounterState::default(),
            }
        }
    }

    #[test]
    fn dispatch_applies_reducer() {
        let store = Store::<CounterReducer>::new(CounterState::default());

        store.dispatch(CounterAction::Add(10));
        assert_eq!(store.get().count, 10);

        store.dispatch(CounterAction::Add(5));
        assert_eq!(store.get().count, 15);
        assert_eq!(store.get().history, vec![10, 15]);

        store.dispatch(CounterAction::Reset);
        assert_eq!(store.get(), CounterState::default());
    }

    #[test]
    fn read_borrows_without_cloning() {
        let store = Store::<CounterReducer>::new(CounterState::default());
        store.dispatch(CounterAction::Add(3));

        let count = store.read(|state| state.count);
        assert_eq!(count, 3);
    }

    #[test]
    fn subscribers_see_every_transition() {
        let store = Store::<CounterReducer>::new(CounterState::default());

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let _guard = store.subscribe(move |_state| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.dispatch(CounterAction::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.dispatch(CounterAction::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn subscriber_receives_new_snapshot() {
        let store = Store::<CounterReducer>::new(CounterState::default());

        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        let _guard = store.subscribe(move |state| {
            seen_clone.store(state.count as usize, Ordering::SeqCst);
        });

        store.dispatch(CounterAction::Add(7));
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn dropping_guard_removes_subscriber() {
        let store = Store::<CounterReducer>::new(CounterState::default());

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let guard = store.subscribe(move |_state| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(CounterAction::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(guard);
        store.dispatch(CounterAction::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_state_and_subscribers() {
        let store = Store::<CounterReducer>::new(CounterState::default());
        let other = store.clone();

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let _guard = store.subscribe(move |_state| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        other.dispatch(CounterAction::Add(2));
        assert_eq!(store.get().count, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
