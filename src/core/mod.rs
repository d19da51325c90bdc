pub mod filter;
pub mod panel;
pub mod pipeline;
pub mod sort;
pub mod stats;
pub mod table;

pub use crate::domain::model::{
    AggregateStats, ColumnSpec, DateRange, FilterState, FilterValue, Record, SortConfig,
    SortDirection, StatKind, StatSpec, StatValue,
};
pub use crate::domain::ports::{Exporter, RecordSource, Storage};
pub use crate::utils::error::Result;
pub use table::{TableState, TableView};
