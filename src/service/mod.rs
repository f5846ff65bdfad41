//! Remote services: party directory and document generation over HTTP

mod client;
mod error;
mod traits;

pub use client::HttpDocumentService;
pub use error::ServiceError;
pub use traits::DocumentService;

#[cfg(test)]
pub use traits::MockDocumentService;
