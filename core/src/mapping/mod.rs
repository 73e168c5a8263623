//! Cobb angle mapping pipeline
//!
//! Stages run in order: validate and resolve, aggregate statistics, format
//! display text. The report stage is deferred until a measurement's report
//! is requested.

pub mod aggregate;
pub mod display_text;
pub mod report;
pub mod resolve;
pub mod rounding;

pub use aggregate::aggregate_stats;
pub use display_text::format_display_text;
pub use report::{build_cobb_angle_report, CobbAngleReport, ANNOTATION_TYPE};
pub use resolve::{resolve_image, validate_event, ResolvedImage};
pub use rounding::round_number;
