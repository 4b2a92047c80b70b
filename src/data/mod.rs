//! Sales data layer
//!
//! Loads the delimited source file into an immutable `SalesTable` and
//! memoizes it per application state.
//!
//! # Example
//!
//! ```rust,no_run
//! use sales_dashboard::data::{CsvLoader, TableCache};
//!
//! let cache = TableCache::new("base_vendas.csv", CsvLoader::new());
//! let table = cache.load()?;
//! println!("{} records", table.len());
//! # Ok::<(), sales_dashboard::data::LoadError>(())
//! ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod types;

pub use cache::{LoadKey, TableCache};
pub use error::{LoadError, LoadResult};
pub use loader::{load_csv, normalize_header, parse_date, CsvLoader};
pub use types::{title_case, SalesRecord, SalesTable};
