/// A pure state transition function.
///
/// The reducer is the only place where state transitions happen: every
/// mutation of a [`Store`](crate::store::Store) goes through
/// [`reduce`](Reducer::reduce), which maps the current state and an action to
/// the next state with no side effects. Actions are ordinary enums, so the
/// set of transitions is closed and checked at compile time.
///
/// # Examples
///
/// ```
/// use valise::store::{Reducer, Store};
///
/// #[derive(Clone, Debug, PartialEq, Default)]
/// struct Counter {
///     count: i32,
/// }
///
/// enum CounterAction {
///     Add(i32),
///     Reset,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = Counter;
///     type Action = CounterAction;
///
///     fn reduce(state: Counter, action: CounterAction) -> Counter {
///         match action {
///             CounterAction::Add(n) => Counter { count: state.count + n },
///             CounterAction::Reset => Counter { count: 0 },
///         }
///     }
/// }
///
/// let store = Store::<CounterReducer>::new(Counter::default());
/// store.dispatch(CounterAction::Add(5));
/// assert_eq!(store.get().count, 5);
/// ```
pub trait Reducer {
    /// The state this reducer transitions.
    type State: Clone + Send + Sync + 'static;

    /// The closed set of transitions.
    type Action: Send + 'static;

    /// Map the current state and an action to the next state.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
