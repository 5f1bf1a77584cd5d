//! Page rendering.
//!
//! Every page is a tera template that extends `layout.html`:
//!
//! ```text
//! {% extends "layout.html" %}
//! {% block content %} … {% endblock content %}
//! ```
//!
//! Both files are read from disk on every call. Editing a template takes
//! effect on the next request without a restart.

use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tokio::fs;

use crate::error::Result;

const LAYOUT: &str = "layout.html";

/// A directory of page templates plus the shared layout.
#[derive(Clone, Debug)]
pub struct Templates {
    dir: PathBuf,
}

impl Templates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Renders page `name` (without the `.html` suffix) inside the layout.
    ///
    /// A missing template file surfaces as [`Error::Io`](crate::Error::Io);
    /// a syntax error or a context that lacks a referenced value surfaces
    /// as [`Error::Template`](crate::Error::Template).
    pub async fn render(&self, name: &str, context: &Context) -> Result<String> {
        let page = format!("{name}.html");
        let layout_source = fs::read_to_string(self.dir.join(LAYOUT)).await?;
        let page_source = fs::read_to_string(self.dir.join(&page)).await?;

        let mut tera = Tera::default();
        tera.add_raw_templates([
            (LAYOUT, layout_source.as_str()),
            (page.as_str(), page_source.as_str()),
        ])?;
        Ok(tera.render(&page, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    async fn templates_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Templates) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let templates = Templates::new(dir.path());
        (dir, templates)
    }

    const LAYOUT_SRC: &str = "<main>{% block content %}{% endblock content %}</main>";

    #[tokio::test]
    async fn page_is_wrapped_in_layout() {
        let (_dir, templates) = templates_with(&[
            (LAYOUT, LAYOUT_SRC),
            ("hello.html", r#"{% extends "layout.html" %}{% block content %}hi {{ who }}{% endblock content %}"#),
        ])
        .await;

        let mut ctx = Context::new();
        ctx.insert("who", "there");
        let html = templates.render("hello", &ctx).await.unwrap();
        assert_eq!(html, "<main>hi there</main>");
    }

    #[tokio::test]
    async fn values_are_escaped() {
        let (_dir, templates) = templates_with(&[
            (LAYOUT, LAYOUT_SRC),
            ("hello.html", r#"{% extends "layout.html" %}{% block content %}{{ who }}{% endblock content %}"#),
        ])
        .await;

        let mut ctx = Context::new();
        ctx.insert("who", "<script>");
        let html = templates.render("hello", &ctx).await.unwrap();
        assert_eq!(html, "<main>&lt;script&gt;</main>");
    }

    #[tokio::test]
    async fn missing_page_is_io_error() {
        let (_dir, templates) = templates_with(&[(LAYOUT, LAYOUT_SRC)]).await;
        let err = templates.render("nope", &Context::new()).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }

    #[tokio::test]
    async fn missing_layout_is_io_error() {
        let (_dir, templates) = templates_with(&[("hello.html", "plain")]).await;
        let err = templates.render("hello", &Context::new()).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }

    #[tokio::test]
    async fn shape_mismatch_is_template_error() {
        let (_dir, templates) = templates_with(&[
            (LAYOUT, LAYOUT_SRC),
            ("hello.html", r#"{% extends "layout.html" %}{% block content %}{{ article.Title }}{% endblock content %}"#),
        ])
        .await;

        let err = templates.render("hello", &Context::new()).await.unwrap_err();
        assert!(matches!(err, Error::Template(_)), "{err:?}");
    }
}
