use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::models::qr_code::QrCodeRecord;

/// Connect and make sure the listing index exists.
pub async fn get_database(uri: &str, name: &str) -> Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .context("Failed to create MongoDB client")?;
    let db = client.database(name);

    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB did not answer ping")?;

    let listing_index = IndexModel::builder()
        .keys(doc! { "user_id": 1, "is_active": 1, "created_at": -1 })
        .options(
            IndexOptions::builder()
                .name("qr_codes_owner_listing".to_string())
                .build(),
        )
        .build();
    db.collection::<QrCodeRecord>("qr_codes")
        .create_index(listing_index)
        .await
        .context("Failed to create qr_codes index")?;

    log::info!("Connected to MongoDB database {}", name);
    Ok(db)
}
