//! Narrated text reports over an org chart
//!
//! Reports only build lines; the caller decides where they go.

use tracing::instrument;

use crate::application::{demo_chart, ApplicationResult};
use crate::config::Settings;
use crate::domain::{OrgChart, OrgUnit, RenderStyle, SearchScope, UnitId};

pub struct OrgReport<'a> {
    chart: &'a OrgChart,
    style: RenderStyle,
}

impl<'a> OrgReport<'a> {
    pub fn new(chart: &'a OrgChart, style: RenderStyle) -> Self {
        Self { chart, style }
    }

    fn money(&self, amount: f64) -> String {
        format!("{:.*}", self.style.salary_precision, amount)
    }

    pub fn hierarchy(&self, id: UnitId) -> Vec<String> {
        self.chart.render_with(id, &self.style).collect()
    }

    pub fn headcount_line(&self, id: UnitId) -> String {
        format!("Total employees: {}", self.chart.total_headcount(id))
    }

    pub fn budget_line(&self, id: UnitId) -> String {
        format!("Total budget: {}", self.money(self.chart.total_budget(id)))
    }

    pub fn updated_budget_line(&self, id: UnitId) -> String {
        format!(
            "Updated budget after salary change: {}",
            self.money(self.chart.total_budget(id))
        )
    }

    /// Outcome of a name search below `department`, absence included.
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, department: UnitId, name: &str, scope: SearchScope) -> Vec<String> {
        match self.chart.find_by_name_in(department, name, scope) {
            Some(found) => {
                let kind = match self.chart.unit(found) {
                    Some(unit) if unit.is_department() => "Department",
                    _ => "Employee",
                };
                let mut lines = vec![format!("{} found: {}", kind, name)];
                lines.extend(self.chart.render_with(found, &self.style));
                lines
            }
            None => vec!["Employee not found.".to_string()],
        }
    }

    /// Employee names below `department`, with a header opening the listing
    /// of each department on the way down.
    pub fn roster(&self, department: UnitId) -> Vec<String> {
        self.chart
            .descendants(department)
            .map(|(_, _, node)| match node.unit() {
                OrgUnit::Department(d) => format!(
                    "Employees of department {} and its sub-departments:",
                    d.name()
                ),
                OrgUnit::Employee(e) => format!(" - {}", e.name()),
            })
            .collect()
    }
}

/// Full walkthrough on the demo chart: listing, totals, a raise for Alice,
/// a search and the roster.
#[instrument(level = "debug", skip(settings))]
pub fn run_demo(settings: &Settings) -> ApplicationResult<Vec<String>> {
    let mut chart = demo_chart()?;
    let root = chart.root();
    let style = settings.render_style();
    let scope = settings.search_scope();

    let mut lines = {
        let report = OrgReport::new(&chart, style.clone());
        let mut lines = report.hierarchy(root);
        lines.push(report.headcount_line(root));
        lines.push(report.budget_line(root));
        lines
    };

    let alice = chart.require_by_name(root, "Alice", SearchScope::EmployeesOnly)?;
    chart.set_salary(alice, 75000.0)?;

    let report = OrgReport::new(&chart, style);
    lines.push(report.updated_budget_line(root));
    lines.extend(report.search(root, "Alice", scope));
    lines.extend(report.roster(root));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_missing_name_when_searching_then_single_not_found_line() {
        let chart = demo_chart().unwrap();
        let report = OrgReport::new(&chart, RenderStyle::default());
        assert_eq!(
            report.search(chart.root(), "Zoe", SearchScope::EmployeesOnly),
            vec!["Employee not found.".to_string()]
        );
    }
}
