//! Metadata registry
//!
//! Derived, append-only index of property descriptors mirroring the store's
//! name set. Descriptors exist for reflection-style consumers: a property
//! browser holding only a descriptor can still report the declared type and
//! reach the live value through the owning container.

use crate::error::{Error, Result};
use crate::object::{Expando, ExpandoState};
use crate::value::{TypeKind, Value};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Weak;

/// Metadata record mirroring one stored property
///
/// Created exactly once per name, at first assignment. The declared type is
/// frozen at that point and never updated, even when the stored value later
/// changes shape: the descriptor reports what the property looked like when
/// it came into existence.
///
/// The owner reference is weak and used only for dispatch; a descriptor
/// never keeps its container alive.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    type_kind: TypeKind,
    read_only: bool,
    owner: Weak<ExpandoState>,
}

impl PropertyDescriptor {
    pub(crate) fn new(name: String, type_kind: TypeKind, owner: Weak<ExpandoState>) -> Self {
        Self {
            name,
            type_kind,
            read_only: false,
            owner,
        }
    }

    /// Name of the property this descriptor mirrors
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type, frozen at the property's first write
    pub fn type_kind(&self) -> TypeKind {
        self.type_kind
    }

    /// Whether the property rejects writes (always `false` in this design)
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The owning container, if it is still alive
    pub fn owner(&self) -> Option<Expando> {
        self.owner.upgrade().map(Expando::from_state)
    }

    /// Read the live value through the owning container
    ///
    /// Returns `None` when the container has been dropped or the name is
    /// somehow absent (names are never removed, so the latter does not
    /// happen for descriptors obtained from a live container).
    pub fn value(&self) -> Option<Value> {
        self.owner().and_then(|owner| owner.get(&self.name))
    }

    /// Write the live value through the owning container
    ///
    /// Goes through the container's write path, so the usual change
    /// notification fires. Fails only when the container has been dropped.
    pub fn set_value(&self, value: impl Into<Value>) -> Result<()> {
        match self.owner() {
            Some(owner) => {
                owner.set(&self.name, value);
                Ok(())
            }
            None => Err(Error::DetachedDescriptor {
                name: self.name.clone(),
            }),
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("type_kind", &self.type_kind)
            .field("read_only", &self.read_only)
            .field("attached", &(self.owner.strong_count() > 0))
            .finish()
    }
}

/// Append-only descriptor index with stable insertion order
///
/// The registry's name set always equals the store's: the container
/// registers a descriptor in the same logical operation as the first write
/// of a name, and no delete operation exists.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    /// Descriptors in registration (first-write) order
    descriptors: Vec<PropertyDescriptor>,
    /// Name to position in `descriptors`
    index: FxHashMap<String, usize>,
}

impl DescriptorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Register a descriptor unless one already exists for the name
    ///
    /// Idempotent: a second registration for a present name is a no-op,
    /// which is what freezes the declared type at first write. Returns
    /// `true` when a descriptor was created.
    pub(crate) fn register_if_absent(
        &mut self,
        name: &str,
        type_kind: TypeKind,
        owner: Weak<ExpandoState>,
    ) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.descriptors.len());
        self.descriptors
            .push(PropertyDescriptor::new(name.to_string(), type_kind, owner));
        true
    }

    /// All descriptors in registration order
    pub fn all(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// Look up the descriptor for a name
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check whether no descriptors are registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_if_absent_is_idempotent() {
        let mut registry = DescriptorRegistry::new();
        assert!(registry.register_if_absent("x", TypeKind::Int, Weak::new()));
        assert!(!registry.register_if_absent("x", TypeKind::String, Weak::new()));
        assert_eq!(registry.len(), 1);
        // First registration wins; the declared type never changes.
        assert_eq!(registry.get("x").map(|d| d.type_kind()), Some(TypeKind::Int));
    }

    #[test]
    fn test_all_in_registration_order() {
        let mut registry = DescriptorRegistry::new();
        registry.register_if_absent("b", TypeKind::Int, Weak::new());
        registry.register_if_absent("a", TypeKind::Any, Weak::new());
        registry.register_if_absent("c", TypeKind::String, Weak::new());
        let names: Vec<&str> = registry.all().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_get_missing() {
        let registry = DescriptorRegistry::new();
        assert!(registry.get("absent").is_none());
    }

    #[test]
    fn test_descriptors_are_read_write() {
        let mut registry = DescriptorRegistry::new();
        registry.register_if_absent("x", TypeKind::Int, Weak::new());
        assert!(!registry.get("x").unwrap().is_read_only());
    }

    #[test]
    fn test_detached_descriptor() {
        let descriptor = PropertyDescriptor::new("x".to_string(), TypeKind::Int, Weak::new());
        assert!(descriptor.owner().is_none());
        assert_eq!(descriptor.value(), None);
        assert_eq!(
            descriptor.set_value(1),
            Err(Error::DetachedDescriptor {
                name: "x".to_string()
            })
        );
    }
}
