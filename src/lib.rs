//! Catalog data contract.
//!
//! The `data` feature exposes the category and product records in their
//! normalized (`domain`) and serialized (`dto`) forms. The default `catalog`
//! feature adds an in-memory catalog, services that materialize the embedded
//! views and report consistency problems, and the `catalog-check` binary.

#[cfg(feature = "catalog")]
pub mod cli;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "catalog")]
pub mod repository;
#[cfg(feature = "catalog")]
pub mod services;
#[cfg(feature = "catalog")]
pub mod settings;
