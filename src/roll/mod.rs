//! Roll tracking and export

pub mod export;
pub mod session;

pub use export::{build_export_data, export_csv, export_filename, export_json, ExportData, RollSummary};
pub use session::{allowed_frame_counts, default_frame_count, FrameLog, RollConditions, RollSession};
