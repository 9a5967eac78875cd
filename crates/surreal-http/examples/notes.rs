//! Notes and categories against a running SurrealDB
//! Run with: cargo run --package surreal-http --example notes
//!
//! Connection settings come from `SURREALDB_*` variables (or `.env`),
//! falling back to root/root on test/test.

use anyhow::Result;
use surreal_http::{ClientConfig, Fields, Reference, Select, SurrealClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut config = ClientConfig::from_env()?;
    if config.username.is_empty() {
        config = config.with_credentials("root", "root");
    }
    if config.namespace.is_empty() {
        config = config.with_namespace("test").with_database("test");
    }

    let db = SurrealClient::new(config)?;

    db.create(
        "category:education",
        &Fields::new()
            .set("name", "Education")
            .set("description", "Stuff")
            .set("cat_id", 1),
    )
    .await?;

    db.create(
        "notes:test",
        &Fields::new()
            .set("title", "Test")
            .set("body", "Test")
            .set("category", Reference::new("category", "education")),
    )
    .await?;

    let notes = db
        .select_with(
            "notes",
            &Select::new()
                .condition("category.name = 'Education'")
                .fetch("notes, category"),
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&notes)?);

    db.close().await?;
    Ok(())
}
