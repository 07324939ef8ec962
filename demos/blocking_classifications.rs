//! Add a classification to an entity, then list its classifications, using the
//! blocking client.
//!
//! Run:
//! `CATALOG_BASE_URL=<url> cargo run --example blocking_classifications -- <guid> <classification>`

use catalog_client::{BlockingCatalogClient, Payload, RequestOptions};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(base_url) = std::env::var("CATALOG_BASE_URL") else {
        eprintln!("Set CATALOG_BASE_URL before running this example.");
        std::process::exit(2);
    };
    let mut args = std::env::args().skip(1);
    let (Some(guid), Some(classification)) = (args.next(), args.next()) else {
        eprintln!("Pass an entity GUID and a classification name.");
        std::process::exit(2);
    };

    let mut client = BlockingCatalogClient::new(base_url)?;
    if let Ok(token) = std::env::var("CATALOG_ACCESS_TOKEN") {
        client = client.with_authorization_token(token);
    }

    let options = RequestOptions::new();
    let body = Payload::from_json(&json!([{ "typeName": classification }]))?;
    client.add_classifications(&guid, body, &options)?;

    let classifications = client.get_classifications(&guid, &options)?;
    println!("{}", serde_json::to_string_pretty(&classifications.to_value()?)?);
    Ok(())
}
