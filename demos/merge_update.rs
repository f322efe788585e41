//! Partial update merge example
//!
//! Decodes a stored article and a sparse PATCH payload from JSON, assigns a
//! local id to a newly created comment, and merges the update on top of the
//! stored record.
//!
//! Run with: RUST_LOG=trace cargo run --example merge_update

use jsonapi_reconcile::identity::assign_local_id;
use jsonapi_reconcile::merge::score;
use jsonapi_reconcile::{merge_nodes, Map, Node, Nullable, Relationship, UuidGenerator, Value};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct ArticlePatch {
    #[serde(default)]
    title: Nullable<String>,
    #[serde(default)]
    subtitle: Nullable<String>,
    #[serde(default)]
    archived: Nullable<bool>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Resource Merge Example");
    println!("======================\n");

    let stored = Node {
        attributes: Arc::new(to_map(json!({
            "title": "Draft",
            "body": "Lorem ipsum dolor sit amet",
            "tags": ["rust", "jsonapi"]
        }))?),
        ..Node::new("articles", "1")
    }
    .with_relationship("author", Relationship::to_one(Node::new("people", "9")))
    .with_link("self", "/articles/1");

    let patch: ArticlePatch = serde_json::from_value(json!({
        "title": "Final",
        "subtitle": null
    }))?;
    println!("Patch states:");
    println!("  title:    {:?}", patch.title.get());
    println!("  subtitle: {:?}", patch.subtitle.get());
    println!("  archived: {:?}", patch.archived.get());

    let mut comment = Node::new("comments", "").with_attribute("body", "First!");
    assign_local_id(&mut comment, Some(&UuidGenerator))?;
    println!("\nNew comment lid: {}", comment.lid);

    let update = Node::new("articles", "")
        .with_attribute("title", patch.title)
        .with_attribute("subtitle", patch.subtitle)
        .with_relationship("comments", Relationship::to_many(vec![comment]));

    println!("\nScores (stored / update):");
    println!(
        "  attributes:    {} / {}",
        score(&stored.attributes),
        score(&update.attributes)
    );
    println!(
        "  relationships: {} / {}",
        score(&stored.relationships),
        score(&update.relationships)
    );

    let merged = merge_nodes(&stored, &update);
    println!("\nMerged:");
    println!("  type: {}", merged.resource_type);
    println!("  id:   {}", merged.id);
    println!("  attributes:    {:?}", merged.attributes.keys().collect::<Vec<_>>());
    println!(
        "  relationships: {:?}",
        merged.relationships.keys().collect::<Vec<_>>()
    );
    println!("  links kept:    {}", merged.links.is_some());

    Ok(())
}

fn to_map(value: serde_json::Value) -> anyhow::Result<Map> {
    match Value::from(value) {
        Value::Map(map) => Ok(map),
        other => anyhow::bail!("expected a JSON object, got {:?}", other),
    }
}
