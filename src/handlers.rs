//! The blog's routes and their handlers.
//!
//! | Route                    | Method     | Handler            |
//! |--------------------------|------------|--------------------|
//! | `/`                      | GET        | [`home`]           |
//! | `/articles/new`          | GET        | [`new_article`]    |
//! | `/articles`              | POST       | [`create_article`] |
//! | `/articles/{title}`      | GET        | [`show_article`]   |
//! | `/articles/{title}/edit` | GET        | [`edit_article`]   |
//! | `/articles/{title}`      | PUT, POST  | [`update_article`] |
//! | anything else            | GET, HEAD  | [`static_file`]    |
//!
//! Handlers share nothing but [`App`]; all state lives on disk.

use std::path::PathBuf;
use std::sync::Arc;

use tera::Context;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::method::Method;
use crate::render::Templates;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::static_files;
use crate::store::ArticleStore;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct App {
    pub store: ArticleStore,
    pub templates: Templates,
    pub public_dir: PathBuf,
}

impl App {
    /// Builds the app from `config`, creating the article directory if it
    /// does not exist yet.
    pub async fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            store: ArticleStore::open(&config.articles_dir).await?,
            templates: Templates::new(&config.templates_dir),
            public_dir: config.public_dir.clone(),
        })
    }

    async fn page(&self, name: &str, context: &Context) -> Result<Response> {
        let html = self.templates.render(name, context).await?;
        Ok(Response::html(html))
    }
}

/// The route table.
pub fn routes() -> Router<App> {
    Router::new()
        .on(Method::Get,  "/",                       home)
        .on(Method::Get,  "/articles/new",           new_article)
        .on(Method::Post, "/articles",               create_article)
        .on(Method::Get,  "/articles/{title}",       show_article)
        .on(Method::Get,  "/articles/{title}/edit",  edit_article)
        .on(Method::Put,  "/articles/{title}",       update_article)
        // HTML forms can only POST.
        .on(Method::Post, "/articles/{title}",       update_article)
        .fallback(static_file)
}

/// Where an article lives.
pub fn article_path(slug: &str) -> String {
    format!("/articles/{slug}")
}

fn slug_param(req: &Request) -> &str {
    req.param("title").unwrap_or_default()
}

/// `GET /` — every article, newest first.
pub async fn home(app: Arc<App>, _req: Request) -> Result<Response> {
    let articles = app.store.list_all().await?;
    let mut context = Context::new();
    context.insert("articles", &articles);
    app.page("home", &context).await
}

/// `GET /articles/new` — the empty creation form.
pub async fn new_article(app: Arc<App>, _req: Request) -> Result<Response> {
    app.page("new_article", &Context::new()).await
}

/// `POST /articles` — create from the `title`/`body` form fields.
///
/// An empty title is accepted and yields an article with an empty slug.
pub async fn create_article(app: Arc<App>, req: Request) -> Result<Response> {
    let form = req.form();
    let article = app.store.create(form.value("title"), form.value("body"));
    app.store.save(&article).await?;
    info!(slug = %article.slug, "article created");
    Ok(Response::redirect(&article_path(&article.slug)))
}

/// `GET /articles/{title}`
pub async fn show_article(app: Arc<App>, req: Request) -> Result<Response> {
    let article = app.store.load(slug_param(&req)).await?;
    let mut context = Context::new();
    context.insert("article", &article);
    app.page("article", &context).await
}

/// `GET /articles/{title}/edit`
pub async fn edit_article(app: Arc<App>, req: Request) -> Result<Response> {
    let article = app.store.load(slug_param(&req)).await?;
    let mut context = Context::new();
    context.insert("article", &article);
    app.page("edit_article", &context).await
}

/// `PUT /articles/{title}` — overwrite title and body, keep the slug.
pub async fn update_article(app: Arc<App>, req: Request) -> Result<Response> {
    let mut article = app.store.load(slug_param(&req)).await?;
    let form = req.form();
    article.update(form.value("title"), form.value("body"));
    app.store.save(&article).await?;
    info!(slug = %article.slug, "article updated");
    Ok(Response::redirect(&article_path(&article.slug)))
}

/// Any other `GET`/`HEAD` — a file from the public directory.
pub async fn static_file(app: Arc<App>, req: Request) -> Response {
    static_files::serve(&app.public_dir, req.path()).await
}
