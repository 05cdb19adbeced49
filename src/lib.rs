pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod record;
pub mod summary;

pub use aggregate::{DashboardSummary, summarize};
pub use error::LoadError;
pub use filter::{DateRange, filter_by_date};
pub use loader::RentalTable;
pub use record::{RentalRecord, YearIndicator};
pub use summary::{SummaryRow, SummaryTable};
