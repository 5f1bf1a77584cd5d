//! Unified error type.

use thiserror::Error;

/// The error type returned by quill's fallible operations.
///
/// Every variant maps onto exactly one HTTP status when a handler returns
/// it, see the [`IntoResponse`](crate::IntoResponse) impl in `response.rs`.
#[derive(Debug, Error)]
pub enum Error {
    /// No article is stored under this slug.
    #[error("article `{0}` not found")]
    NotFound(String),

    /// The filesystem refused a read, write or directory listing.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A stored article is not valid JSON for the article shape.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// A template failed to parse or render.
    #[error("{}", render_chain(.0))]
    Template(#[from] tera::Error),

    /// The request body could not be read as a form.
    #[error("{0}")]
    Form(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// tera keeps the useful part ("Variable `x` not found") in the source chain.
fn render_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_display_raw_message() {
        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn template_errors_include_cause() {
        let mut tera = tera::Tera::default();
        tera.add_raw_template("t.html", "{{ missing }}").unwrap();
        let err = Error::from(tera.render("t.html", &tera::Context::new()).unwrap_err());
        assert!(err.to_string().contains("missing"), "{err}");
    }
}
