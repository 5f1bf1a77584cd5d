//! HTTP method as a typed enum.
//!
//! Only the RFC 9110 methods are modelled. Anything else (WebDAV verbs,
//! extension methods) is answered with `405 Method Not Allowed` before it
//! reaches the router.

use std::fmt;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete  => "DELETE",
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch   => "PATCH",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Trace   => "TRACE",
        }
    }

    /// Methods the static file fallback answers.
    pub(crate) fn is_read(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = ();

    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        Ok(match *m {
            http::Method::CONNECT => Self::Connect,
            http::Method::DELETE  => Self::Delete,
            http::Method::GET     => Self::Get,
            http::Method::HEAD    => Self::Head,
            http::Method::OPTIONS => Self::Options,
            http::Method::PATCH   => Self::Patch,
            http::Method::POST    => Self::Post,
            http::Method::PUT     => Self::Put,
            http::Method::TRACE   => Self::Trace,
            _                     => return Err(()),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
