//! Org chart files: TOML description to [`OrgChart`]
//!
//! ```toml
//! name = "Main Dept"
//!
//! [[units]]
//! kind = "employee"
//! name = "Charlie"
//! position = "Manager"
//! salary = 90000.0
//!
//! [[units]]
//! kind = "department"
//! name = "Development"
//!
//! [[units.units]]
//! kind = "employee"
//! name = "Alice"
//! position = "Developer"
//! salary = 70000.0
//! ```
//!
//! Children are attached in file order, employees and departments alike.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DomainResult, OrgChart, UnitId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EmployeeSpec {
    pub name: String,
    pub position: String,
    pub salary: f64,
}

/// A department and everything below it. The file's top level is one of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChartSpec {
    pub name: String,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

/// One child entry, discriminated by its `kind` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnitSpec {
    Employee(EmployeeSpec),
    Department(ChartSpec),
}

impl ChartSpec {
    /// Materialize this spec as a chart rooted at a department of the same name.
    #[instrument(level = "debug", skip(self, settings), fields(root = %self.name))]
    pub fn build(&self, settings: &Settings) -> ApplicationResult<OrgChart> {
        let mut chart = OrgChart::new(self.name.clone());
        let mut stack: Vec<(&ChartSpec, UnitId)> = vec![(self, chart.root())];

        while let Some((spec, dept)) = stack.pop() {
            for unit in &spec.units {
                let id = match unit {
                    UnitSpec::Employee(emp) => {
                        if settings.reject_negative_salary && emp.salary < 0.0 {
                            return Err(ApplicationError::NegativeSalary {
                                name: emp.name.clone(),
                                salary: emp.salary,
                            });
                        }
                        chart.add_employee(emp.name.clone(), emp.position.clone(), emp.salary)
                    }
                    UnitSpec::Department(sub) => {
                        let id = chart.add_department(sub.name.clone());
                        stack.push((sub, id));
                        id
                    }
                };
                chart.add_child(dept, id)?;
            }
        }

        debug!("built chart with {} units", chart.len());
        Ok(chart)
    }
}

/// Parse chart TOML. `origin` names the source in error messages.
pub fn parse_chart(content: &str, origin: &str, settings: &Settings) -> ApplicationResult<OrgChart> {
    let spec: ChartSpec = toml::from_str(content).map_err(|e| ApplicationError::InvalidChart {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    spec.build(settings)
}

#[instrument(level = "debug", skip(settings))]
pub fn load_chart(path: &Path, settings: &Settings) -> ApplicationResult<OrgChart> {
    let content = std::fs::read_to_string(path).with_path_context("read chart", path)?;
    let chart = parse_chart(&content, &path.display().to_string(), settings)?;
    info!("loaded chart from {}", path.display());
    Ok(chart)
}

/// The classroom scenario: Charlie manages Main Dept, Alice develops, Bob designs.
pub fn demo_chart() -> DomainResult<OrgChart> {
    let mut chart = OrgChart::new("Main Dept");
    let root = chart.root();

    let alice = chart.add_employee("Alice", "Developer", 70000.0);
    let bob = chart.add_employee("Bob", "Designer", 60000.0);
    let charlie = chart.add_employee("Charlie", "Manager", 90000.0);

    let dev = chart.add_department("Development");
    chart.add_child(dev, alice)?;

    let design = chart.add_department("Design");
    chart.add_child(design, bob)?;

    chart.add_child(root, charlie)?;
    chart.add_child(root, dev)?;
    chart.add_child(root, design)?;
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_demo_chart_when_inspecting_then_matches_scenario() {
        let chart = demo_chart().unwrap();
        let root = chart.root();
        assert_eq!(chart.total_headcount(root), 3);
        assert_eq!(chart.total_budget(root), 220000.0);
        let names: Vec<&str> = chart.employee_names(root).collect();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn given_unknown_field_when_parsing_then_reports_origin() {
        let err = parse_chart("name = \"X\"\nbudget = 3\n", "inline", &Settings::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid chart inline:"));
    }
}
