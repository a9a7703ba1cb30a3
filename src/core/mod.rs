pub mod aggregator;
pub mod catalog;
pub mod dashboard;
pub mod filter;
pub mod grouping;
pub mod store;

pub use crate::domain::model::{LaunchRecord, OutcomeClass, PayloadRange, SiteSelection};
pub use crate::domain::ports::{ChartSurface, RecordSource, Storage};
pub use crate::utils::error::Result;
