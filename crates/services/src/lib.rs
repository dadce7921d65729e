//! Application services for the museum catalogue.
//!
//! Services validate and delegate to the repositories in `museum-store`.
//! Search and report services work on snapshots taken at construction and
//! never observe later repository changes.

pub mod artist_service;
pub mod boundary;
pub mod category_service;
pub mod config;
pub mod exhibit_service;
pub mod museum;
pub mod report_service;
pub mod search_service;

pub use artist_service::ArtistService;
pub use boundary::{CatalogSink, CatalogSource, InMemoryCatalog};
pub use category_service::CategoryService;
pub use config::MuseumConfig;
pub use exhibit_service::ExhibitService;
pub use museum::{LoadSummary, Museum};
pub use report_service::{GeneralStatistics, ReportService, StatusCount, escape_csv};
pub use search_service::SearchService;
