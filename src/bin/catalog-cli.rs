use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use catalog_client::{CatalogClient, Payload, RequestOptions};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "catalog-cli",
    version,
    about = "Small async CLI for calling catalog entity operations"
)]
struct Cli {
    /// Base URL of the catalog service (for example `https://catalog.example.com`).
    #[arg(long, env = "CATALOG_BASE_URL")]
    base_url: Option<String>,

    /// Access token sent as a bearer token in the Authorization header.
    #[arg(long, env = "CATALOG_ACCESS_TOKEN")]
    access_token: Option<String>,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog operation ids.
    Operations {
        /// Filter operations by case-insensitive substring match on operation id.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Call a catalog operation by id.
    Call(CallArgs),
}

#[derive(Debug, Args)]
struct CallArgs {
    /// Operation id (for example: getByGuid).
    operation_id: String,

    /// Path parameter in form key=value. Repeat as needed.
    #[arg(long = "path-param", value_name = "KEY=VALUE")]
    path_param: Vec<String>,

    /// Query parameter in form key=value. Repeat as needed.
    #[arg(long = "query", value_name = "KEY=VALUE")]
    query: Vec<String>,

    /// Extra request header in form name=value. Repeat as needed.
    #[arg(long = "header", value_name = "NAME=VALUE")]
    header: Vec<String>,

    /// Print the status alongside the body instead of failing on non-2xx.
    #[arg(long)]
    with_response: bool,

    #[command(flatten)]
    body: BodyInput,
}

#[derive(Debug, Args)]
struct BodyInput {
    /// JSON request body literal.
    #[arg(long, conflicts_with = "body_file")]
    body_json: Option<String>,

    /// Path to a file containing a JSON request body.
    #[arg(long, value_name = "PATH", conflicts_with = "body_json")]
    body_file: Option<PathBuf>,
}

/// Entry point for the async CLI.
///
/// Parses command-line arguments, builds the client, dispatches subcommands,
/// and prints JSON output.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let args = match &cli.command {
        // `operations` is metadata-only; it does not require an HTTP client.
        Command::Operations { filter } => {
            print_operations(filter.as_deref());
            return Ok(());
        }
        Command::Call(args) => args,
    };

    let Some(base_url) = &cli.base_url else {
        bail!("--base-url or CATALOG_BASE_URL is required for calls");
    };
    let mut client = CatalogClient::new(base_url)
        .with_context(|| format!("failed to create client with base URL '{base_url}'"))?;
    if let Some(token) = &cli.access_token {
        client = client.with_authorization_token(token.clone());
    }

    let output = call_operation(&client, args)
        .await
        .with_context(|| format!("operation call failed: '{}'", args.operation_id))?;

    print_json(&output, cli.compact).context("failed to print JSON output")?;
    Ok(())
}

/// Prints the catalog operation table.
///
/// When `filter` is provided, only operation ids containing that substring are shown.
fn print_operations(filter: Option<&str>) {
    let filter = filter.map(str::to_ascii_lowercase);

    let operations: Vec<_> = catalog_client::operations()
        .iter()
        .filter(|operation| {
            filter
                .as_ref()
                .is_none_or(|needle| operation.operation_id.to_ascii_lowercase().contains(needle))
        })
        .collect();

    let operation_id_width = operations
        .iter()
        .map(|operation| operation.operation_id.len())
        .max()
        .unwrap_or(0);

    for operation in operations {
        println!(
            "{:<operation_id_width$}  {:<6}  {}",
            operation.operation_id, operation.method, operation.path_template
        );
    }
}

/// Calls a catalog operation by `operation_id`.
///
/// Parses path/query/header pairs and an optional JSON body from CLI args,
/// then forwards the request to `CatalogClient::call`.
async fn call_operation(client: &CatalogClient, args: &CallArgs) -> Result<Value> {
    let path_params = parse_pairs(&args.path_param, "--path-param")
        .context("failed to parse --path-param arguments")?;
    let query = parse_pairs(&args.query, "--query").context("failed to parse --query arguments")?;
    let headers =
        parse_pairs(&args.header, "--header").context("failed to parse --header arguments")?;
    let body = parse_body(&args.body).context("failed to parse request body input")?;

    let options = RequestOptions { headers, query };
    let borrowed_path: Vec<(&str, &str)> = path_params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    if args.with_response {
        let envelope = client
            .call_with_response(&args.operation_id, &borrowed_path, body, &options)
            .await?;
        let body = envelope.body().map_or(Value::Null, render_payload);
        return Ok(json!({ "status": envelope.status(), "body": body }));
    }

    let payload = client
        .call(&args.operation_id, &borrowed_path, body, &options)
        .await
        .with_context(|| format!("catalog operation '{}' returned an error", args.operation_id))?;
    Ok(render_payload(&payload))
}

/// Renders a response body as JSON, falling back to a string for non-JSON bodies.
fn render_payload(payload: &Payload) -> Value {
    payload
        .to_value()
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(payload.as_bytes()).into_owned()))
}

/// Parses repeated `key=value` arguments into owned key/value pairs.
///
/// Returns an error when a value does not include `=` or has an empty key.
fn parse_pairs(values: &[String], flag_name: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(values.len());
    for item in values {
        let Some((key, value)) = item.split_once('=') else {
            bail!("invalid {flag_name} value '{item}': expected key=value");
        };
        if key.is_empty() {
            bail!("invalid {flag_name} value '{item}': empty key");
        }
        pairs.push((key.to_owned(), value.to_owned()));
    }
    Ok(pairs)
}

/// Parses an optional JSON body from inline text or a file path.
///
/// The JSON is checked locally so typos fail before any network call; the
/// payload is then sent as given.
fn parse_body(body: &BodyInput) -> Result<Option<Payload>> {
    let raw = match (&body.body_json, &body.body_file) {
        (Some(raw), None) => raw.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read --body-file '{}'", path.display()))?,
        (None, None) => return Ok(None),
        (Some(_), Some(_)) => bail!("use only one of --body-json or --body-file"),
    };

    serde_json::from_str::<Value>(&raw).context("request body is not valid JSON")?;
    Ok(Some(Payload::json_bytes(raw.into_bytes())))
}

/// Prints a JSON value either compact or pretty-formatted.
fn print_json(value: &Value, compact: bool) -> Result<()> {
    if compact {
        println!(
            "{}",
            serde_json::to_string(value).context("Failed to render JSON")?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to render JSON")?
        );
    }
    Ok(())
}
