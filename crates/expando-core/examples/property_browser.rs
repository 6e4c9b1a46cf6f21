//! Drive a dynamic container the way a generic property browser would:
//! subscribe to changes, write members, then render the descriptor table
//! and read every value through its descriptor.

use expando_core::{Expando, InvokeOutcome, Value};

fn main() {
    let user = Expando::with_class_name("User");

    user.subscribe(|name| println!("  [changed] {}", name));

    println!("populating:");
    user.set("name", "Alice");
    user.set("age", 30);
    user.set("active", true);
    user.set(
        "greet",
        Value::function(|args| {
            let who = args.first().and_then(Value::as_str).unwrap_or("stranger");
            Value::String(format!("hello, {}!", who))
        }),
    );

    // Updating an existing member notifies again but adds no descriptor.
    user.set("age", 31);

    println!("\n{} properties:", user.class_name());
    for descriptor in user.descriptors() {
        let value = descriptor.value().unwrap_or(Value::Null);
        println!("  {:<8} {:<10} = {}", descriptor.name(), descriptor.type_kind().to_string(), value);
    }

    match user.invoke("greet", &[Value::from("Bob")]) {
        InvokeOutcome::Invoked(result) => println!("\ngreet(\"Bob\") -> {}", result),
        InvokeOutcome::NotCallable => println!("\ngreet exists but is not callable"),
        InvokeOutcome::Missing => println!("\nno greet member"),
    }

    match user.to_json() {
        Ok(json) => println!("\nas JSON: {}", json),
        Err(err) => println!("\nnot serializable: {}", err),
    }
}
