//! HTTP module
//!
//! Provides the request handler every client operation goes through.
//!
//! # Features
//!
//! - **URL Resolution**: API endpoints or absolute URLs
//! - **Authentication**: Bearer token from the client's `Auth`
//! - **Status Checking**: Non-2xx responses become `Error::HttpStatus`

mod handler;
mod request;

pub use handler::RequestHandler;
pub use request::RequestConfig;
