//! Line-oriented views of an org tree

use tracing::instrument;

use crate::domain::arena::{Descendants, OrgChart, UnitId};

/// How rendered lines are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// Prefix repeated once per level below the rendered unit
    pub indent: String,
    /// Digits after the decimal point for salaries
    pub salary_precision: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            salary_precision: 1,
        }
    }
}

impl OrgChart {
    /// Hierarchy listing of `id` and its subtree, one line per unit.
    ///
    /// The iterator is lazy and borrows the chart; call again for a fresh
    /// pass. A stale handle renders nothing.
    pub fn render(&self, id: UnitId) -> Render<'_> {
        self.render_with(id, &RenderStyle::default())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn render_with(&self, id: UnitId, style: &RenderStyle) -> Render<'_> {
        Render {
            walk: self.descendants(id),
            style: style.clone(),
        }
    }

    /// Names of every employee below `department`, pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn employee_names(&self, department: UnitId) -> EmployeeNames<'_> {
        EmployeeNames {
            walk: self.descendants(department),
        }
    }
}

#[derive(Clone)]
pub struct Render<'a> {
    walk: Descendants<'a>,
    style: RenderStyle,
}

impl Iterator for Render<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, depth, node) = self.walk.next()?;
        Some(format!(
            "{}{}",
            self.style.indent.repeat(depth),
            node.unit().describe(self.style.salary_precision)
        ))
    }
}

#[derive(Clone)]
pub struct EmployeeNames<'a> {
    walk: Descendants<'a>,
}

impl<'a> Iterator for EmployeeNames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk
            .by_ref()
            .find_map(|(_, _, node)| node.unit().as_employee().map(|e| e.name()))
    }
}
