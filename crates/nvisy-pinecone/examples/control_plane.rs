//! Lists, describes and optionally creates an index.
//!
//! Reads `PINECONE_API_KEY` from the environment or a `.env` file:
//!
//! ```bash
//! cargo run -p nvisy-pinecone --example control_plane -- my-index
//! ```

use nvisy_pinecone::{Metric, PineconeClient, ServerlessSpec};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("nvisy_pinecone=debug"))?,
        )
        .init();

    let api_key = std::env::var("PINECONE_API_KEY")?;
    let client = PineconeClient::from_api_key(api_key)?;

    for index in client.list_indexes().await? {
        println!(
            "{:<32} dim={:<6} metric={:<10} ready={}",
            index.name,
            index.dimension,
            index.metric,
            index.is_ready()
        );
    }

    if let Some(name) = std::env::args().nth(1) {
        let index = match client.describe_index(&name).await {
            Ok(index) => index,
            Err(err) if err.is_not_found() => {
                client
                    .create_index(&name, 1536, Metric::Cosine, ServerlessSpec::new("aws", "us-east-1"))
                    .await?
            }
            Err(err) => return Err(err.into()),
        };
        println!("{} -> {}", index.name, index.host);
    }

    client.close();
    Ok(())
}
