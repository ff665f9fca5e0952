use poem::error::ParseJsonError;
use poem::http::StatusCode;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response};

use crate::prelude::*;
use crate::web::rejection::Rejection;

/// Renders the errors escaping the endpoints as JSON rejections.
///
/// Client errors carry their message, server errors are logged and answered with a generic one.
pub struct ErrorMiddleware;

impl<E: Endpoint> Middleware<E> for ErrorMiddleware {
    type Output = ErrorEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorEndpoint { ep }
    }
}

pub struct ErrorEndpoint<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for ErrorEndpoint<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> poem::Result<Response> {
        let path = request.uri().path().to_string();
        let error = match self.ep.call(request).await {
            Ok(output) => return Ok(output.into_response()),
            Err(error) => error,
        };
        let status = status_of(&error);
        if status.is_server_error() {
            error!(path = path.as_str(), %status, "{:#}", error);
            Ok(Rejection::new("internal server error").with_status(status))
        } else {
            info!(path = path.as_str(), %status, "{:#}", error);
            Ok(Rejection::new(error.to_string()).with_status(status))
        }
    }
}

/// Any unreadable JSON body is a bad request, including one with a wrong content type.
fn status_of(error: &poem::Error) -> StatusCode {
    if error.is::<ParseJsonError>() {
        StatusCode::BAD_REQUEST
    } else {
        error.status()
    }
}
