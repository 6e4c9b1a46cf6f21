//! Dynamically-extensible property container
//!
//! An [`Expando`] starts with no fixed shape and acquires named members at
//! runtime, while staying fully inspectable by reflection-style consumers
//! (property browsers, data-binding engines, serializers) and observable
//! through synchronous change notification.
//!
//! The core is the coupling between three pieces:
//!
//! - [`PropertyStore`] — the authoritative name-to-value mapping
//! - [`DescriptorRegistry`] — append-only descriptors (name + declared
//!   type) mirroring the store, in first-write order
//! - [`ChangeNotifier`] — a multicast channel that delivers the changed
//!   name to every subscriber on every write
//!
//! [`Expando`] is the façade tying them together: a first write creates the
//! property and its descriptor in one logical operation, and every write
//! fires exactly one notification.
//!
//! # Example
//!
//! ```ignore
//! use expando_core::{Expando, InvokeOutcome, Value};
//!
//! let obj = Expando::new();
//! obj.subscribe(|name| println!("{} changed", name));
//!
//! obj.set("name", "Alice");
//! obj.set("age", 30);
//! obj.set("greet", Value::function(|args| {
//!     Value::String(format!("hello {}", args[0]))
//! }));
//!
//! for descriptor in obj.descriptors() {
//!     println!("{}: {}", descriptor.name(), descriptor.type_kind());
//! }
//!
//! match obj.invoke("greet", &[Value::from("Bob")]) {
//!     InvokeOutcome::Invoked(result) => println!("{}", result),
//!     InvokeOutcome::NotCallable => println!("greet is not callable"),
//!     InvokeOutcome::Missing => println!("no such member"),
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod json;
pub mod notify;
pub mod object;
pub mod registry;
pub mod store;
pub mod value;

pub use error::{Error, Result};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use object::Expando;
pub use registry::{DescriptorRegistry, PropertyDescriptor};
pub use store::{InvokeOutcome, PropertyStore};
pub use value::{NativeFunction, TypeKind, Value};
