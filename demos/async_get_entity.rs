//! Fetch an entity by GUID using the async `CatalogClient`.
//!
//! Run:
//! `CATALOG_BASE_URL=<url> CATALOG_ACCESS_TOKEN=<token> cargo run --features cli --example async_get_entity -- <guid>`

use catalog_client::{CatalogClient, InvocationState, RequestOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(base_url) = std::env::var("CATALOG_BASE_URL") else {
        eprintln!("Set CATALOG_BASE_URL before running this example.");
        std::process::exit(2);
    };
    let Some(guid) = std::env::args().nth(1) else {
        eprintln!("Pass an entity GUID as the first argument.");
        std::process::exit(2);
    };

    let mut client = CatalogClient::new(base_url)?;
    if let Ok(token) = std::env::var("CATALOG_ACCESS_TOKEN") {
        client = client.with_authorization_token(token);
    }

    let options = RequestOptions::new().query("minExtInfo", "true");
    let result = client.get_by_guid_with_response(&guid, &options).await;
    println!("state: {:?}", InvocationState::of(&result));

    let envelope = result?;
    println!("status: {}", envelope.status());
    if let Some(body) = envelope.body() {
        println!("{}", serde_json::to_string_pretty(&body.to_value()?)?);
    }
    Ok(())
}
