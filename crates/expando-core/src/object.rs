//! Dynamic container
//!
//! [`Expando`] is the member-access surface external collaborators use: an
//! object with no fixed shape that acquires named properties at runtime.
//! Every first write registers a descriptor for reflection consumers, and
//! every write fires exactly one change notification.
//!
//! An `Expando` is a shared handle with reference semantics: clones alias
//! the same container, which is what lets descriptors and change handlers
//! reach back into a live object.

use crate::notify::{ChangeNotifier, SubscriptionId};
use crate::registry::{DescriptorRegistry, PropertyDescriptor};
use crate::store::{InvokeOutcome, PropertyStore};
use crate::value::{TypeKind, Value};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

const DEFAULT_CLASS_NAME: &str = "Expando";

/// Store and registry live under one lock so a first write creates the
/// property and its descriptor as a single logical operation.
#[derive(Default)]
struct ObjectData {
    store: PropertyStore,
    registry: DescriptorRegistry,
}

pub(crate) struct ExpandoState {
    class_name: String,
    data: Mutex<ObjectData>,
    notifier: ChangeNotifier,
}

/// Dynamically-extensible property container
///
/// Starts empty; each first write of a new name creates the property
/// together with its metadata descriptor, and every write (first or not)
/// delivers one synchronous change notification to subscribers.
///
/// ```ignore
/// use expando_core::{Expando, Value};
///
/// let obj = Expando::new();
/// obj.set("name", "Alice");
/// obj.set("greet", Value::function(|args| {
///     Value::String(format!("hello {}", args[0]))
/// }));
///
/// assert_eq!(obj.get("name"), Some(Value::from("Alice")));
/// let greeting = obj.invoke("greet", &[Value::from("Bob")]);
/// assert!(greeting.is_invoked());
/// ```
#[derive(Clone)]
pub struct Expando {
    state: Arc<ExpandoState>,
}

impl Expando {
    /// Create an empty container
    pub fn new() -> Self {
        Self::with_class_name(DEFAULT_CLASS_NAME)
    }

    /// Create an empty container with a class name
    ///
    /// The class name is what reflection consumers display as the
    /// component's type; it has no effect on member storage.
    pub fn with_class_name(class_name: impl Into<String>) -> Self {
        Self {
            state: Arc::new(ExpandoState {
                class_name: class_name.into(),
                data: Mutex::new(ObjectData::default()),
                notifier: ChangeNotifier::new(),
            }),
        }
    }

    pub(crate) fn from_state(state: Arc<ExpandoState>) -> Self {
        Self { state }
    }

    /// Class name reported to reflection consumers
    pub fn class_name(&self) -> &str {
        &self.state.class_name
    }

    /// Read a member by name
    ///
    /// An undeclared member reads as `None` rather than failing.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.state.data.lock().store.get(name)
    }

    /// Write a member by name
    ///
    /// A first write creates the property and registers its descriptor with
    /// the declared type computed from the value's runtime shape (`any` for
    /// null). Every write fires exactly one notification, whether or not
    /// the value differs from the previous one.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        {
            let mut data = self.state.data.lock();
            let declared = TypeKind::of(&value);
            if data.store.set(name, value) {
                data.registry
                    .register_if_absent(name, declared, Arc::downgrade(&self.state));
            }
        }
        // Handlers run with the state lock released so they can re-enter
        // the container.
        self.state.notifier.notify(name);
    }

    /// Call a member by name
    ///
    /// The lookup happens under the state lock; the callable itself runs
    /// with the lock released so it can re-enter the container.
    pub fn invoke(&self, name: &str, args: &[Value]) -> InvokeOutcome {
        let lookup = self.state.data.lock().store.get(name);
        InvokeOutcome::dispatch(lookup, args)
    }

    /// Known member names in first-write order
    pub fn names(&self) -> Vec<String> {
        self.state.data.lock().store.names()
    }

    /// Point-in-time snapshot of every member name and value
    ///
    /// Not a live view: later writes do not show up in the returned map.
    pub fn to_map(&self) -> FxHashMap<String, Value> {
        self.state.data.lock().store.to_map()
    }

    /// Check whether a member is present
    pub fn contains(&self, name: &str) -> bool {
        self.state.data.lock().store.contains(name)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.state.data.lock().store.len()
    }

    /// Check whether the container has no members
    pub fn is_empty(&self) -> bool {
        self.state.data.lock().store.is_empty()
    }

    /// All property descriptors in registration order
    pub fn descriptors(&self) -> Vec<PropertyDescriptor> {
        self.state.data.lock().registry.all().to_vec()
    }

    /// Descriptor for one member, if the member exists
    pub fn descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.state.data.lock().registry.get(name).cloned()
    }

    /// Subscribe to change notifications
    ///
    /// The handler receives the changed member name on every write, runs
    /// synchronously, and may itself mutate the container.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.state.notifier.subscribe(handler)
    }

    /// Detach a previously subscribed handler
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.notifier.unsubscribe(id)
    }

    /// Check whether two handles alias the same container
    pub fn ptr_eq(&self, other: &Expando) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for Expando {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Expando {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.state.data.lock();
        f.debug_struct("Expando")
            .field("class_name", &self.state.class_name)
            .field("names", &data.store.names())
            .field("subscribers", &self.state.notifier.len())
            .finish()
    }
}
