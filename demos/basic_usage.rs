//! Basic usage example for the Nimbus storage client
//!
//! This example demonstrates:
//! - Checking quota and available tiers
//! - Uploading a file with metadata
//! - Listing a folder
//! - Downloading through a signed URL
//! - Deleting a file
//!
//! Reads `NIMBUS_ENDPOINT` and `NIMBUS_API_KEY` (a `.env` file works too).
//!
//! Run with: cargo run --example basic_usage

use bytes::Bytes;
use nimbus_client::{ClientError, ListOptions, NimbusClient, UploadRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nimbus_client=debug")))
        .init();

    println!("☁️  Nimbus Storage - Basic Usage Example\n");

    let client = NimbusClient::from_env()?;
    println!("Using endpoint {}", client.config().api_base());

    // ==================== Account ====================

    println!("\n📊 Checking quota...");
    let quota = client.get_quota().await?;
    println!(
        "   Tier '{}': {} of {} used ({:.1}%), {} files",
        quota.tier,
        quota.used_formatted(),
        quota.limit_formatted(),
        quota.percentage,
        quota.files_count
    );
    if quota.is_almost_full() {
        println!("   ⚠️  Storage is almost full, {} left", quota.remaining_formatted());
    }

    println!("\n💳 Available tiers:");
    for tier in client.get_tiers().await? {
        let marker = if tier.is_current { " (current)" } else { "" };
        println!(
            "   - {}{}: {} storage, {}",
            tier.name,
            marker,
            tier.storage_limit_formatted(),
            tier.display_price()
        );
    }

    // ==================== Files ====================

    println!("\n📤 Uploading 'hello.txt' to /examples...");
    let upload = UploadRequest::new(Bytes::from_static(b"Hello from the Nimbus SDK!"), "hello.txt")
        .with_folder("examples")
        .with_metadata_entry("source", "basic_usage")
        .with_metadata_entry("uploaded_by", serde_json::json!({ "tool": "demo", "version": 1 }));

    let uploaded = match client.upload_file(upload).await {
        Ok(outcome) => outcome,
        Err(ClientError::QuotaExceeded(details)) => {
            println!("   ❌ Quota exceeded: {}", details.message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    println!("   ✅ Uploaded {} ({})", uploaded.file_id, uploaded.formatted_size());

    println!("\n📋 Listing /examples...");
    let page = client.list_files(ListOptions::new().with_folder("examples")).await?;
    for file in &page.items {
        println!(
            "   - {} [{}] {}",
            file.file_name,
            file.mime_type.as_deref().unwrap_or("unknown"),
            file.formatted_size()
        );
    }
    println!("   Page {} of {} ({} files)", page.current_page(), page.total_pages().max(1), page.total);

    println!("\n📥 Downloading {}...", uploaded.file_id);
    let data = client.download_file(&uploaded.file_id).await?;
    println!("   Content: {}", String::from_utf8_lossy(&data));

    println!("\n🗑️  Deleting {}...", uploaded.file_id);
    client.delete_file(&uploaded.file_id).await?;
    match client.get_file(&uploaded.file_id).await {
        Err(e) if e.is_not_found() => println!("   ✅ File deleted"),
        Ok(_) => println!("   ⚠️  File still present"),
        Err(e) => return Err(e.into()),
    }

    client.close();
    println!("\n✨ Done");
    Ok(())
}
