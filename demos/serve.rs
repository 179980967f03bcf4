//! Serve a single-page-app build directory from memory.
//!
//! Run with:
//!   SPA_ROOT=./dist RUST_LOG=spa_cache=debug cargo run --example serve
//!
//! Try:
//!   curl -i http://localhost:3000/
//!   curl -i http://localhost:3000/some/client/route
//!   curl -i -H 'accept-encoding: gzip' http://localhost:3000/assets/app.js --output -

use std::net::SocketAddr;

use spa_cache::{MimeTypes, Router, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "spa_cache=info".into()),
        )
        .init();

    let root = std::env::var("SPA_ROOT").unwrap_or_else(|_| "./dist".to_owned());
    let addr: SocketAddr = std::env::var("SPA_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_owned())
        .parse()?;

    // Everything is read and compressed here, before the first request.
    let router = Router::build(&root, &MimeTypes::default())?;

    Server::bind(addr).serve(router).await?;
    Ok(())
}
