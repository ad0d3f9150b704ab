//! Wire types for the bfhl service.

pub mod operation;
pub mod response;

pub use operation::Operation;
pub use response::ApiResponse;
