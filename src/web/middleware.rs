pub use self::error::ErrorMiddleware;

mod error;
