//! Process configuration.
//!
//! Nothing is read from the environment or the command line. The defaults
//! are the historical fixed values; embedders and tests override them with
//! the `with_*` methods.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ARTICLES_DIR: &str = "./articles";
pub const DEFAULT_TEMPLATES_DIR: &str = "./templates";
pub const DEFAULT_PUBLIC_DIR: &str = "./public";
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Everything the blog needs to know at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the server listens on.
    pub addr: SocketAddr,
    /// Directory holding one `<slug>.json` per article.
    pub articles_dir: PathBuf,
    /// Directory holding `layout.html` and the page templates.
    pub templates_dir: PathBuf,
    /// Directory served for every path no route claims.
    pub public_dir: PathBuf,
    /// Request bodies above this many bytes are refused with 413.
    pub max_body_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            articles_dir: DEFAULT_ARTICLES_DIR.into(),
            templates_dir: DEFAULT_TEMPLATES_DIR.into(),
            public_dir: DEFAULT_PUBLIC_DIR.into(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl Config {
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_articles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.articles_dir = dir.into();
        self
    }

    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = dir.into();
        self
    }

    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }
}
