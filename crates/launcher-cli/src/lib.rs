//! Process-backed shell around `launcher_core`.
//!
//! - `config`: environment parsing for picker, opener and dispatch settings.
//! - `catalog_file`: optional TOML catalog override.
//! - `process`: dmenu-style picker and detached opener gateways.
//! - `logging`: env_logger setup for operator messages.

pub mod catalog_file;
pub mod config;
pub mod error;
pub mod logging;
pub mod process;

use launcher_core::Catalog;

use crate::catalog_file::{CatalogFileError, load_catalog};
use crate::config::RuntimeConfig;

/// The configured catalog file, or the compiled-in one.
pub fn resolve_catalog(config: &RuntimeConfig) -> Result<Catalog, CatalogFileError> {
    match &config.catalog_path {
        Some(path) => {
            log::debug!("loading catalog from {}", path.display());
            load_catalog(path)
        }
        None => Ok(Catalog::builtin()),
    }
}
