//! Integration tests for the metadata surface
//!
//! A generic property browser holds only descriptors: it must be able to
//! enumerate them in a stable order, reach the owning container, and read
//! or write live values without knowing the container's shape.

use expando_core::{Error, Expando, PropertyDescriptor, TypeKind, Value};

#[test]
fn test_descriptor_table_for_a_browser() {
    let obj = Expando::with_class_name("User");
    obj.set("name", "Alice");
    obj.set("age", 30);
    obj.set("active", true);

    assert_eq!(obj.class_name(), "User");

    let rows: Vec<(String, TypeKind)> = obj
        .descriptors()
        .iter()
        .map(|d| (d.name().to_string(), d.type_kind()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("name".to_string(), TypeKind::String),
            ("age".to_string(), TypeKind::Int),
            ("active".to_string(), TypeKind::Bool),
        ]
    );
}

#[test]
fn test_read_through_descriptor() {
    let obj = Expando::new();
    obj.set("x", 1);
    let descriptor = obj.descriptor("x").unwrap();

    assert_eq!(descriptor.value(), Some(Value::Int(1)));
    obj.set("x", 2);
    // Descriptors carry no value; reads always see the live store.
    assert_eq!(descriptor.value(), Some(Value::Int(2)));
}

#[test]
fn test_write_through_descriptor_notifies() {
    let obj = Expando::new();
    obj.set("x", 1);

    let notified = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = notified.clone();
    obj.subscribe(move |_| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    let descriptor = obj.descriptor("x").unwrap();
    descriptor.set_value(5).unwrap();

    assert_eq!(obj.get("x"), Some(Value::Int(5)));
    assert_eq!(notified.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_descriptor_owner_round_trip() {
    let obj = Expando::new();
    obj.set("x", 1);

    let owner = obj.descriptor("x").unwrap().owner().unwrap();
    assert!(owner.ptr_eq(&obj));

    // Mutating through the recovered owner is the same container.
    owner.set("y", 2);
    assert_eq!(obj.get("y"), Some(Value::Int(2)));
}

#[test]
fn test_descriptor_outlives_container_as_detached() {
    let descriptor: PropertyDescriptor = {
        let obj = Expando::new();
        obj.set("x", 1);
        obj.descriptor("x").unwrap()
    };

    // Metadata survives; the weak owner reference does not keep the
    // container alive.
    assert_eq!(descriptor.name(), "x");
    assert_eq!(descriptor.type_kind(), TypeKind::Int);
    assert!(descriptor.owner().is_none());
    assert_eq!(descriptor.value(), None);
    assert_eq!(
        descriptor.set_value(2),
        Err(Error::DetachedDescriptor {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_descriptors_always_read_write() {
    let obj = Expando::new();
    obj.set("x", 1);
    obj.set("f", Value::function(|_| Value::Null));
    assert!(obj.descriptors().iter().all(|d| !d.is_read_only()));
}

#[test]
fn test_registry_mirrors_store_names() {
    let obj = Expando::new();
    for name in ["a", "b", "c", "d"] {
        obj.set(name, 1);
    }
    let descriptor_names: Vec<String> = obj
        .descriptors()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(descriptor_names, obj.names());
}
