use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Error returned when a handle is requested outside any providing scope.
///
/// This signals a wiring defect (a consumer ran without its provider), not a
/// runtime condition: it is never absorbed into a store's error slot, and
/// callers should treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{type_name} was used outside a providing scope")]
pub struct ContextMisuseError {
    type_name: &'static str,
}

impl ContextMisuseError {
    fn new<T>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Full type name of the handle that was requested.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

type BoxedProvider = Box<dyn Any + Send + Sync>;

/// A provider scope: a typed registry of shared handles with explicit
/// lifecycle.
///
/// A scope is created at wiring time, handles are registered with
/// [`provide`](Scope::provide), and consumers resolve them with
/// [`use_context`] while running inside [`enter`](Scope::enter). Scopes nest:
/// code entered in an inner scope sees the providers of every enclosing
/// scope, nearest first, mirroring lookup along a component tree. When the
/// last clone of the `Arc<Scope>` drops, every provided handle is released.
///
/// There is deliberately no process-global fallback: resolving a handle with
/// no scope on the stack is a [`ContextMisuseError`].
///
/// # Examples
///
/// ```
/// use valise::runtime::{use_context, Scope};
///
/// let scope = Scope::new();
/// scope.provide(42u32);
///
/// let value = scope.enter(|| use_context::<u32>());
/// assert_eq!(value, Ok(42));
///
/// // Outside the scope the same lookup is a wiring error.
/// assert!(use_context::<u32>().is_err());
/// ```
pub struct Scope {
    providers: RwLock<HashMap<TypeId, BoxedProvider>>,
}

// Thread-local stack of entered scopes. Scope resolution is per thread:
// handles are resolved synchronously at wiring time and then moved into
// whatever tasks need them.
thread_local! {
    static SCOPE_STACK: RefCell<Vec<Arc<Scope>>> = RefCell::new(vec![]);
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            providers: RwLock::new(HashMap::new()),
        })
    }

    /// Register a handle under its type.
    ///
    /// Providing a second handle of the same type replaces the first, the
    /// same way a nested provider shadows an outer one.
    pub fn provide<T>(&self, handle: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.providers
            .write()
            .unwrap()
            .insert(TypeId::of::<T>(), Box::new(handle));
    }

    /// Look up a handle provided directly on this scope.
    fn get<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.providers
            .read()
            .unwrap()
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }

    /// Run a function with this scope active.
    ///
    /// The scope is pushed onto the thread-local stack for the duration of
    /// `f` and popped afterwards, even if `f` panics.
    ///
    /// # Examples
    ///
    /// ```
    /// use valise::runtime::{use_context, Scope};
    ///
    /// let outer = Scope::new();
    /// outer.provide("config".to_string());
    ///
    /// let inner = Scope::new();
    /// inner.provide(1u8);
    ///
    /// outer.enter(|| {
    ///     inner.enter(|| {
    ///         // Inner scopes see outer providers.
    ///         assert_eq!(use_context::<String>().as_deref(), Ok("config"));
    ///         assert_eq!(use_context::<u8>(), Ok(1));
    ///     })
    /// });
    /// ```
    pub fn enter<F, R>(self: &Arc<Self>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        SCOPE_STACK.with(|stack| {
            stack.borrow_mut().push(Arc::clone(self));
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        SCOPE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }
}

/// Resolve a handle from the nearest enclosing scope that provides it.
///
/// Scopes are searched innermost first. Fails with [`ContextMisuseError`]
/// when no entered scope provides `T`, including when no scope is entered at
/// all.
pub fn use_context<T>() -> Result<T, ContextMisuseError>
where
    T: Clone + Send + Sync + 'static,
{
    SCOPE_STACK.with(|stack| {
        for scope in stack.borrow().iter().rev() {
            if let Some(handle) = scope.get::<T>() {
                return Ok(handle);
            }
        }
        Err(ContextMisuseError::new::<T>())
    })
}
