//! List the catalog operations known to the client.
//!
//! Run:
//! `cargo run --example blocking_list_operations`

use catalog_client::{BodyRule, operations};

fn main() {
    let operations = operations();
    println!("Loaded {} operations", operations.len());

    for operation in operations {
        let body = match operation.body {
            BodyRule::Required => "body",
            BodyRule::Forbidden => "",
        };
        println!(
            "- {:<6} {:<90} ({}) {body}",
            operation.method, operation.path_template, operation.operation_id
        );
    }
}
