//! Arrow IPC file inspection.

pub mod container;
pub mod magic;
pub mod render;
pub mod report;
pub mod style;

pub use container::ContainerHandle;
pub use render::{NULL_PLACEHOLDER, RenderOptions, render, render_with};
pub use report::{ReportFormat, ReportOptions, ReportSummary, inspect};
