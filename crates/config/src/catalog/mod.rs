//! Scenario catalog loading
//!
//! Reads the three catalog files, checks them with `CatalogValidator`, and
//! publishes the result as an immutable `CatalogSnapshot`. Readers clone an
//! `Arc` to the current snapshot; `CatalogManager::reload` builds a new
//! snapshot off to the side and swaps it in only if it validates.
//!
//! # Example
//!
//! ```ignore
//! use catalyst_config::CatalogManager;
//!
//! let manager = CatalogManager::load("config/catalog")?;
//! let snapshot = manager.snapshot();
//! println!("{} scenarios", snapshot.catalog.len());
//! ```

mod files;
mod manager;
mod snapshot;
mod validator;

pub use files::{Currency, CurrenciesFile, ScenariosFile};
pub use manager::CatalogManager;
pub use snapshot::CatalogSnapshot;
pub use validator::{
    CatalogValidator, ValidationCategory, ValidationFinding, ValidationReport, ValidationSeverity,
};
