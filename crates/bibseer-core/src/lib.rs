//! The aggregation pipeline: drive the search-then-expand query pattern over
//! a list of bibliography titles, fold the citing papers into a dedup map,
//! rank them, and emit the report.

pub mod aggregate;
pub mod citers;
pub mod normalize;
pub mod rank;
pub mod report;

pub use aggregate::{ProgressEvent, collect_citers};
pub use citers::{CiterEntry, CiterMap, citer_key};
pub use normalize::normalize_title;
pub use rank::{RankedCiter, rank};
pub use report::{REPORT_HEADER, ReportStats, normalized_title_set, write_report};
