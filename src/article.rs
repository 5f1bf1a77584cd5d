//! The article record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// A single blog post.
///
/// Serialized with capitalised field names (`Title`, `Body`, `Slug`); those
/// names are the on-disk format, so renaming a field breaks existing stores.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Article {
    pub title: String,
    pub body: String,
    pub slug: String,
}

impl Article {
    /// Builds an article, deriving its slug from `title`.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self { title, body: body.into(), slug }
    }

    /// Replaces title and body. The slug is fixed at creation and stays put,
    /// so the article keeps its URL and file.
    pub fn update(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.title = title.into();
        self.body = body.into();
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.slug)
    }
}
