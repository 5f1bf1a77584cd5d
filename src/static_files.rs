//! Static file fallback.
//!
//! Serves the public directory verbatim for every `GET`/`HEAD` no route
//! claims. Directory requests resolve to `index.html`. Anything that would
//! resolve outside the public directory is answered with 404.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tokio::fs;
use tracing::{debug, warn};

use crate::response::{Response, not_found};

const INDEX_FILE: &str = "index.html";

/// Serves `path` (the raw request path) out of `public_dir`.
pub async fn serve(public_dir: &Path, path: &str) -> Response {
    let Some(file) = resolve(public_dir, path).await else {
        debug!(path, "no static file");
        return not_found();
    };

    match fs::read(&file).await {
        Ok(content) => {
            let ext = file.extension().and_then(|e| e.to_str());
            Response::builder().bytes(content_type(ext), content)
        }
        Err(e) => {
            warn!(file = %file.display(), "failed to read static file: {e}");
            not_found()
        }
    }
}

/// Maps a request path onto an existing file inside `public_dir`.
async fn resolve(public_dir: &Path, path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;

    let root = match fs::canonicalize(public_dir).await {
        Ok(root) => root,
        Err(e) => {
            warn!(dir = %public_dir.display(), "public directory not accessible: {e}");
            return None;
        }
    };

    let mut candidate = root.join(decoded.trim_start_matches('/'));
    if fs::metadata(&candidate).await.ok()?.is_dir() {
        candidate.push(INDEX_FILE);
    }

    // Not-found is the common case; only a resolved escape is worth a warning.
    let candidate = fs::canonicalize(&candidate).await.ok()?;
    if !candidate.starts_with(&root) {
        warn!(path, resolved = %candidate.display(), "path traversal attempt blocked");
        return None;
    }

    fs::metadata(&candidate).await.ok()?.is_file().then_some(candidate)
}

/// Content type for a file extension.
pub fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}
