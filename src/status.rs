//! HTTP status codes as a typed enum.
//!
//! Only the codes the blog actually answers with. Use [`Status`] with
//! `Response::status()`, `Response::builder().status()`, or return it
//! bare from a handler.

/// The status codes quill produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    NoContent,           // 204
    Found,               // 302
    SeeOther,            // 303
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    ContentTooLarge,     // 413
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NoContent           => 204,
            Status::Found               => 302,
            Status::SeeOther            => 303,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::ContentTooLarge     => 413,
            Status::InternalServerError => 500,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> Self {
        match s {
            Status::Ok                  => Self::OK,
            Status::NoContent           => Self::NO_CONTENT,
            Status::Found               => Self::FOUND,
            Status::SeeOther            => Self::SEE_OTHER,
            Status::BadRequest          => Self::BAD_REQUEST,
            Status::NotFound            => Self::NOT_FOUND,
            Status::MethodNotAllowed    => Self::METHOD_NOT_ALLOWED,
            Status::ContentTooLarge     => Self::PAYLOAD_TOO_LARGE,
            Status::InternalServerError => Self::INTERNAL_SERVER_ERROR,
        }
    }
}
