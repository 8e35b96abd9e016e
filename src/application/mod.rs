//! Application layer: chart loading and reports
//!
//! This layer feeds the domain from files and settings and turns results into text.

pub mod chart;
pub mod error;
pub mod error_ext;
pub mod report;

pub use chart::{demo_chart, load_chart, parse_chart, ChartSpec, EmployeeSpec, UnitSpec};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use report::{run_demo, OrgReport};
