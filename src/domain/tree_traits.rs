use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{OrgChart, UnitId};
use crate::domain::render::RenderStyle;

/// Conversion of a subtree into a `termtree` display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, id: UnitId, style: &RenderStyle) -> Tree<String>;
}

impl TreeNodeConvert for OrgChart {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, id: UnitId, style: &RenderStyle) -> Tree<String> {
        fn build_tree(chart: &OrgChart, id: UnitId, precision: usize) -> Tree<String> {
            let label = chart
                .unit(id)
                .map(|unit| unit.describe(precision))
                .unwrap_or_default();
            let leaves: Vec<_> = chart
                .children(id)
                .iter()
                .map(|&child| build_tree(chart, child, precision))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }

        if self.node(id).is_none() {
            return Tree::new("Empty tree".to_string());
        }
        build_tree(self, id, style.salary_precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_small_chart_when_converting_then_leaves_follow_children() {
        let mut chart = OrgChart::new("Main");
        let root = chart.root();
        let dev = chart.add_department("Dev");
        let alice = chart.add_employee("Alice", "Developer", 70000.0);
        chart.add_child(root, dev).unwrap();
        chart.add_child(dev, alice).unwrap();

        let rendered = chart.to_tree_string(root, &RenderStyle::default()).to_string();

        assert!(rendered.starts_with("Department: Main"));
        assert!(rendered.contains("Department: Dev"));
        assert!(rendered.contains("Employee: Alice, Position: Developer, Salary: 70000.0"));
    }

    #[test]
    fn given_stale_handle_when_converting_then_reports_empty() {
        let mut chart = OrgChart::new("Main");
        let tmp = chart.add_department("Tmp");
        chart.discard(tmp);
        assert_eq!(
            chart
                .to_tree_string(tmp, &RenderStyle::default())
                .to_string()
                .trim_end(),
            "Empty tree"
        );
    }
}
