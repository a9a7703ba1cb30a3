pub mod export;
pub mod report;

pub use export::SnapshotExporter;
pub use report::SelectionReport;
