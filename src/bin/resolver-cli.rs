use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use rdf_uri_resolver::config::load_config;
use rdf_uri_resolver::identifier::{Identifier, IdentifierCodec, UrlSafeCodec};

#[derive(Parser)]
#[command(name = "resolver-cli")]
#[command(about = "Management CLI for the RDF entity URI resolver", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an entity ID or URL through the running service
    Resolve { input: String },
    /// Encode an entity ID into its URL path segment
    Encode { id: String },
    /// Decode a URL path segment back into the entity ID
    Decode { segment: String },
    /// Load and validate a configuration file
    CheckConfig { path: PathBuf },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { input } => {
            let res = reqwest::Client::new()
                .post(format!("{}/api/resolve", cli.url))
                .json(&serde_json::json!({ "input": input }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Encode { id } => {
            let id = Identifier::new(id)?;
            println!("{}", UrlSafeCodec.encode(&id));
        }
        Commands::Decode { segment } => {
            println!("{}", UrlSafeCodec.decode(&segment)?);
        }
        Commands::CheckConfig { path } => {
            let config = load_config(&path)?;
            println!(
                "OK: {} routes, {} entities, base URL {}",
                config.routes.len(),
                config.entities.len(),
                config.site.base_url
            );
        }
        Commands::Health => {
            let res = reqwest::get(format!("{}/health", cli.url)).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: resolver returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
