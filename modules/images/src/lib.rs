//! Image records module.
//!
//! Layout follows the usual split: `api/rest` owns the HTTP surface,
//! `domain` owns models, validation and authorization, `infra/storage` owns
//! the `SeaORM` entity, migrations and repository.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::ImagesConfig;
