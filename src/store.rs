//! Flat-file article storage.
//!
//! One JSON document per article, named `<slug>.json`, all in one directory.
//! There is no index and no locking: the directory listing *is* the index,
//! and two writers to the same slug simply race (last write wins).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::fs;
use tracing::debug;

use crate::article::Article;
use crate::error::{Error, Result};

const EXTENSION: &str = ".json";

/// A directory of `<slug>.json` article files.
#[derive(Clone, Debug)]
pub struct ArticleStore {
    dir: PathBuf,
}

/// A directory entry that looks like an article, with the timestamp used
/// for ordering.
struct StoredFile {
    slug: String,
    modified: SystemTime,
}

impl ArticleStore {
    /// Binds a store to `dir` without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Binds a store to `dir`, creating the directory first if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir).await?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Builds an unsaved article. Call [`save`](Self::save) to persist it.
    pub fn create(&self, title: &str, body: &str) -> Article {
        Article::new(title, body)
    }

    /// Writes `article` to `<dir>/<slug>.json`, replacing any previous file.
    pub async fn save(&self, article: &Article) -> Result<()> {
        let bytes = serde_json::to_vec(article)?;
        let path = self.path_for(&article.slug);
        fs::write(&path, bytes).await?;
        debug!(slug = %article.slug, path = %path.display(), "article saved");
        Ok(())
    }

    /// Reads the article stored under `slug`.
    pub async fn load(&self, slug: &str) -> Result<Article> {
        // Slugs are single path components; anything else cannot name a
        // file in this store.
        if slug.contains(['/', '\\']) {
            return Err(Error::NotFound(slug.to_owned()));
        }

        let bytes = match fs::read(self.path_for(slug)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(slug.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Loads every article, most recently modified first.
    ///
    /// Fails fast: one unreadable or malformed file aborts the listing and
    /// no partial result is returned.
    pub async fn list_all(&self) -> Result<Vec<Article>> {
        let mut files = self.stored_files().await?;
        files.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let mut articles = Vec::with_capacity(files.len());
        for file in files {
            articles.push(self.load(&file.slug).await?);
        }
        Ok(articles)
    }

    async fn stored_files(&self) -> Result<Vec<StoredFile>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(slug) = name.to_str().and_then(|n| n.strip_suffix(EXTENSION)) else {
                continue;
            };

            let meta = fs::metadata(entry.path()).await?;
            if !meta.is_file() {
                continue;
            }

            files.push(StoredFile {
                slug: slug.to_owned(),
                modified: meta.modified()?,
            });
        }

        Ok(files)
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}{EXTENSION}"))
    }
}
