//! quill — serve the blog on the default address.
//!
//! Expects `./templates` and `./public` next to the working directory;
//! articles land in `./articles`, created on first start.
//!
//! Run with:
//!   RUST_LOG=debug cargo run

use quill::{App, Config, Server, handlers};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::default();
    let app = App::open(&config).await?;
    info!(
        articles = %config.articles_dir.display(),
        templates = %config.templates_dir.display(),
        public = %config.public_dir.display(),
        "blog ready"
    );

    Server::bind(config.addr)
        .max_body_size(config.max_body_size)
        .serve(handlers::routes(), app)
        .await?;
    Ok(())
}
