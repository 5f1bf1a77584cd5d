//! # quill
//!
//! A tiny blog. Articles are JSON files on disk, pages are tera templates,
//! and the whole thing is served by hyper over a radix-tree router.
//!
//! ## What it does
//!
//! - Create, list, view and edit articles, one `<slug>.json` file each
//! - Render every page through a shared `layout.html`
//! - Serve everything else straight out of a public directory
//!
//! ## What it does not do
//!
//! No accounts, no deletion, no search, no pagination, no locking. Two
//! writers to the same slug race and the last one wins.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use quill::{App, Config, Server, handlers};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let app = App::open(&config).await?;
//!
//!     Server::bind(config.addr)
//!         .max_body_size(config.max_body_size)
//!         .serve(handlers::routes(), app)
//!         .await?;
//!     Ok(())
//! }
//! ```

mod article;
mod config;
mod error;
mod handler;
mod method;
mod render;
mod request;
mod response;
mod router;
mod server;
mod slug;
mod status;
mod store;

pub mod handlers;
pub mod static_files;

pub use article::Article;
pub use config::Config;
pub use error::{Error, Result};
pub use handler::Handler;
pub use handlers::App;
pub use method::Method;
pub use render::Templates;
pub use request::{Form, Request};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use slug::slugify;
pub use status::Status;
pub use store::ArticleStore;
