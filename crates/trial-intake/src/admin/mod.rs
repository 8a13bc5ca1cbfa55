//! Admin-facing reporting over stored registrations: filtering, sorting,
//! CSV export, and batch selection for notification runs.

pub mod export;
pub mod query;
pub mod selection;

pub use export::{export_csv, export_filename, CsvExportError};
pub use query::{
    filter_records, natural_compare, sort_records, AdminQuery, EligibilityFilter, SortColumn,
    SortDirection, TableSort,
};
pub use selection::SelectionState;
