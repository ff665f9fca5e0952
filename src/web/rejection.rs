use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every unsuccessful response.
#[derive(Serialize)]
pub struct Rejection {
    pub error: String,
}

impl Rejection {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        Json(self).with_status(status).into_response()
    }
}
