pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod consistency;
pub mod errors;
pub mod import;
pub mod products;
