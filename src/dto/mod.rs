//! Wire shapes of the catalog records.
//!
//! These mirror the serialized form exactly, including the denormalized
//! embeds. Convert to [`crate::domain`] records before working with them.

pub mod categories;
pub mod products;
