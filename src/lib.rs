//! Composite org charts.
//!
//! An [`domain::OrgChart`] stores departments and employees in an arena.
//! Departments own their children in insertion order; aggregates such as
//! headcount and budget are computed from the live tree on every call.
//!
//! ```
//! use orgtree::domain::OrgChart;
//!
//! let mut chart = OrgChart::new("Main Dept");
//! let root = chart.root();
//! let dev = chart.add_department("Development");
//! let alice = chart.add_employee("Alice", "Developer", 70000.0);
//! chart.add_child(root, dev).unwrap();
//! chart.add_child(dev, alice).unwrap();
//!
//! chart.set_salary(alice, 75000.0).unwrap();
//! assert_eq!(chart.total_budget(root), 75000.0);
//! assert_eq!(chart.find_by_name(root, "Alice"), Some(alice));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
