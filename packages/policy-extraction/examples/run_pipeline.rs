//! Run the full pipeline against a live database and the Gemini API.
//!
//! ```sh
//! DATABASE_URL=postgres://... GEMINI_API_KEY=... \
//!     cargo run --example run_pipeline --features gemini,postgres -- <request_id>
//! ```

use std::path::Path;
use std::sync::Arc;

use policy_extraction::ai::GeminiExtractor;
use policy_extraction::stores::PostgresAttachmentStore;
use policy_extraction::{write_record, Pipeline, PipelineConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let request_id: i64 = std::env::args()
        .nth(1)
        .ok_or("usage: run_pipeline <request_id>")?
        .parse()?;

    let database_url = std::env::var("DATABASE_URL")?;

    let config = PipelineConfig::default();
    let store = PostgresAttachmentStore::connect(&database_url).await?;
    let extractor = Arc::new(GeminiExtractor::from_env(&config)?);

    let pipeline = Pipeline::new(store, extractor, config);
    let record = pipeline.run(request_id).await?;

    let path = write_record(&record, Path::new("."))?;
    println!("record written to {}", path.display());

    Ok(())
}
