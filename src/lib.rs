//! # spa-cache
//!
//! An in-memory static asset server for single-page applications.
//! Load the build output once, serve it from RAM forever.
//!
//! ## The contract
//!
//! At startup the asset root is walked, every published file is read into
//! memory and gzipped once. After that no request ever touches the disk:
//!
//! - **Known path** → the cached file.
//! - **Unknown path** → `/index.html`, so client-side routes just work.
//! - **Gzip** → sent when the client accepts it *and* it saves at least one
//!   whole TCP packet. Images, video and other pre-compressed media always go
//!   out as-is.
//!
//! Files and directories starting with `.` or `_` are never published. A
//! root without `index.html` is a startup error, not a runtime surprise.
//!
//! What this crate intentionally ignores: hot reload, ETags, range
//! requests, streaming. Deploy new assets, restart the process.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use spa_cache::{MimeTypes, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spa_cache::Error> {
//!     let router = Router::build("./dist", &MimeTypes::default())?;
//!     Server::bind(([0, 0, 0, 0], 3000)).serve(router).await
//! }
//! ```

mod cache;
mod error;
mod request;
mod response;
mod router;
mod server;

pub mod compress;
pub mod mime;

pub use cache::{AssetCache, CacheRecord, ROOT_DOCUMENT};
pub use error::Error;
pub use mime::MimeTypes;
pub use request::Request;
pub use response::{Encoding, Response};
pub use router::{Resolved, Router, accepts_gzip, normalize};
pub use server::Server;
