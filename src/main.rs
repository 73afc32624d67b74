use anyhow::Context;
use listing_bootstrap::storage::JsonFileStore;
use listing_bootstrap::{AppState, BootstrapPipeline, Config, ListingClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Listing bootstrap");
    info!("API: {}", config.api_base_url);

    let api = Arc::new(ListingClient::with_options(config.client_options())?);
    let store = Arc::new(JsonFileStore::new(&config.token_store_path));
    let state = AppState::new();

    let report = BootstrapPipeline::new(api, store)
        .with_favorite_timeout(config.favorite_timeout())
        .run(&state)
        .await;

    let result = &report.result;
    if report.fell_back {
        info!("Bootstrap fell back to empty data");
    }
    info!(
        "✅ Ready at {}: {} listings, tabs [{}]",
        report.finished_at.to_rfc3339(),
        result.properties.len(),
        result.type_tabs.join(", ")
    );
    if !result.username.is_empty() {
        info!("Signed in as {}", result.username);
    }

    for (i, property) in result.explore.iter().enumerate() {
        let liked = result
            .favorites_map
            .get(&property.id)
            .map(|entry| entry.liked)
            .unwrap_or(false);
        println!("{}. {}{}", i + 1, property.title, if liked { " ♥" } else { "" });
        if let Some(price) = property.price {
            println!("   Price: {:.0}", price);
        }
        println!(
            "   {} bed, {} bath",
            property.number_of_bedrooms.unwrap_or(0),
            property.number_of_bathrooms.unwrap_or(0)
        );
        let labels: Vec<&str> = [property.kind.as_deref(), property.property_type.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !labels.is_empty() {
            println!("   Type: {}", labels.join(" / "));
        }
        println!();
    }

    let json = serde_json::to_string_pretty(result.as_ref())?;
    tokio::fs::write(&config.output_path, json).await?;
    info!("💾 Saved bootstrap result to {}", config.output_path);

    Ok(())
}
