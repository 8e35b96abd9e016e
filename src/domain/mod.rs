//! Domain layer: the org tree and its operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod render;
pub mod tree_traits;

pub use arena::{Descendants, OrgChart, OrgNode, UnitId};
pub use entities::{Department, Employee, OrgUnit, SearchScope};
pub use error::{DomainError, DomainResult};
pub use render::{EmployeeNames, Render, RenderStyle};
pub use tree_traits::TreeNodeConvert;
