//! Tests for the OrgChart composite: aggregates, mutation, search and rendering

use rstest::{fixture, rstest};

use orgtree::domain::{DomainError, OrgChart, SearchScope, UnitId};

struct Scenario {
    chart: OrgChart,
    root: UnitId,
    dev: UnitId,
    design: UnitId,
    alice: UnitId,
    bob: UnitId,
    charlie: UnitId,
}

// Main Dept
// ├── Charlie (Manager, 90000)
// ├── Development
// │   └── Alice (Developer, 70000)
// └── Design
//     └── Bob (Designer, 60000)
#[fixture]
fn scenario() -> Scenario {
    let mut chart = OrgChart::new("Main Dept");
    let root = chart.root();
    let charlie = chart.add_employee("Charlie", "Manager", 90000.0);
    let dev = chart.add_department("Development");
    let alice = chart.add_employee("Alice", "Developer", 70000.0);
    let design = chart.add_department("Design");
    let bob = chart.add_employee("Bob", "Designer", 60000.0);

    chart.add_child(root, charlie).unwrap();
    chart.add_child(root, dev).unwrap();
    chart.add_child(dev, alice).unwrap();
    chart.add_child(root, design).unwrap();
    chart.add_child(design, bob).unwrap();

    Scenario {
        chart,
        root,
        dev,
        design,
        alice,
        bob,
        charlie,
    }
}

// ============================================================
// Aggregates
// ============================================================

#[rstest]
fn given_scenario_when_aggregating_then_matches_literal_values(scenario: Scenario) {
    assert_eq!(scenario.chart.total_headcount(scenario.root), 3);
    assert_eq!(scenario.chart.total_budget(scenario.root), 220000.0);
}

#[rstest]
fn given_department_when_aggregating_then_equals_sum_over_children(scenario: Scenario) {
    let chart = &scenario.chart;
    let children = chart.children(scenario.root);

    let headcount: usize = children.iter().map(|&c| chart.total_headcount(c)).sum();
    let budget: f64 = children.iter().map(|&c| chart.total_budget(c)).sum();

    assert_eq!(chart.total_headcount(scenario.root), headcount);
    assert_eq!(chart.total_budget(scenario.root), budget);
}

#[rstest]
fn given_fractional_salaries_when_aggregating_then_equals_sum_over_children() {
    // Main: A=0.1, Sub{B=0.2, C=0.3}
    let mut chart = OrgChart::new("Main");
    let root = chart.root();
    let a = chart.add_employee("A", "x", 0.1);
    let sub = chart.add_department("Sub");
    let b = chart.add_employee("B", "x", 0.2);
    let c = chart.add_employee("C", "x", 0.3);
    chart.add_child(root, a).unwrap();
    chart.add_child(root, sub).unwrap();
    chart.add_child(sub, b).unwrap();
    chart.add_child(sub, c).unwrap();

    let children: f64 = chart
        .children(root)
        .iter()
        .fold(0.0, |total, &child| total + chart.total_budget(child));

    assert_eq!(chart.total_budget(sub), 0.2 + 0.3);
    assert_eq!(chart.total_budget(root), children);
    assert_eq!(chart.total_budget(root), 0.1 + (0.2 + 0.3));
}

#[rstest]
#[case::alice("Alice", 70000.0)]
#[case::bob("Bob", 60000.0)]
#[case::charlie("Charlie", 90000.0)]
fn given_lone_employee_when_aggregating_then_budget_is_salary(
    scenario: Scenario,
    #[case] name: &str,
    #[case] salary: f64,
) {
    let id = scenario.chart.find_by_name(scenario.root, name).unwrap();
    assert_eq!(scenario.chart.total_headcount(id), 1);
    assert_eq!(scenario.chart.total_budget(id), salary);
}

#[rstest]
fn given_empty_department_when_aggregating_then_zero() {
    let chart = OrgChart::new("Empty");
    assert_eq!(chart.total_headcount(chart.root()), 0);
    assert_eq!(chart.total_budget(chart.root()), 0.0);
}

#[rstest]
fn given_salary_change_when_aggregating_then_every_ancestor_sees_it(mut scenario: Scenario) {
    scenario.chart.set_salary(scenario.alice, 75000.0).unwrap();

    assert_eq!(scenario.chart.total_budget(scenario.root), 225000.0);
    assert_eq!(scenario.chart.total_budget(scenario.dev), 75000.0);
    assert_eq!(scenario.chart.employee(scenario.alice).unwrap().salary(), 75000.0);
}

#[rstest]
fn given_handle_from_search_when_mutating_then_live_tree_changes(mut scenario: Scenario) {
    let found = scenario.chart.find_by_name(scenario.root, "Bob").unwrap();
    scenario.chart.employee_mut(found).unwrap().set_salary(0.0);

    assert_eq!(scenario.chart.total_budget(scenario.design), 0.0);
    assert_eq!(scenario.chart.total_budget(scenario.root), 160000.0);
}

#[rstest]
fn given_department_when_setting_salary_then_not_an_employee(mut scenario: Scenario) {
    let result = scenario.chart.set_salary(scenario.dev, 1.0);
    assert_eq!(
        result,
        Err(DomainError::NotAnEmployee("Development".to_string()))
    );
}

// ============================================================
// Add / remove
// ============================================================

#[rstest]
fn given_child_when_removing_then_headcount_drops_by_its_headcount(mut scenario: Scenario) {
    let before = scenario.chart.total_headcount(scenario.root);
    let removed = scenario.chart.total_headcount(scenario.dev);

    assert!(scenario.chart.remove_child(scenario.root, scenario.dev));

    assert_eq!(
        scenario.chart.total_headcount(scenario.root),
        before - removed
    );
    assert_eq!(scenario.chart.parent(scenario.dev), None);
    // retained handle still works on the detached subtree
    assert_eq!(scenario.chart.total_budget(scenario.dev), 70000.0);
}

#[rstest]
fn given_absent_child_when_removing_then_noop(mut scenario: Scenario) {
    // Alice is a grandchild, not a direct child of root
    assert!(!scenario.chart.remove_child(scenario.root, scenario.alice));
    assert!(!scenario.chart.remove_child(scenario.alice, scenario.bob));
    assert_eq!(scenario.chart.total_headcount(scenario.root), 3);
}

#[rstest]
fn given_children_when_adding_then_insertion_order_kept(mut scenario: Scenario) {
    let zed = scenario.chart.add_employee("Zed", "Intern", 1000.0);
    let amy = scenario.chart.add_employee("Amy", "Intern", 1000.0);
    scenario.chart.add_child(scenario.design, zed).unwrap();
    scenario.chart.add_child(scenario.design, amy).unwrap();

    assert_eq!(
        scenario.chart.children(scenario.design),
        &[scenario.bob, zed, amy]
    );
}

#[rstest]
fn given_duplicate_names_when_adding_then_both_kept(mut scenario: Scenario) {
    let second_bob = scenario.chart.add_employee("Bob", "Designer", 1.0);
    scenario.chart.add_child(scenario.design, second_bob).unwrap();

    assert_eq!(scenario.chart.total_headcount(scenario.design), 2);
    // first in pre-order wins
    assert_eq!(
        scenario.chart.find_by_name(scenario.root, "Bob"),
        Some(scenario.bob)
    );
}

#[rstest]
fn given_attached_child_when_adding_elsewhere_then_rejected(mut scenario: Scenario) {
    let result = scenario.chart.add_child(scenario.design, scenario.alice);

    assert_eq!(
        result,
        Err(DomainError::AlreadyAttached {
            child: "Alice".to_string(),
            parent: "Development".to_string(),
        })
    );
    assert_eq!(scenario.chart.total_headcount(scenario.root), 3);
}

#[rstest]
fn given_ancestor_when_adding_below_descendant_then_cycle_rejected(mut scenario: Scenario) {
    let team = scenario.chart.add_department("Team");
    scenario.chart.add_child(scenario.dev, team).unwrap();
    scenario.chart.remove_child(scenario.root, scenario.dev);

    let result = scenario.chart.add_child(team, scenario.dev);

    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
}

#[rstest]
fn given_department_when_adding_to_itself_then_cycle_rejected(mut scenario: Scenario) {
    let lone = scenario.chart.add_department("Lone");
    assert!(matches!(
        scenario.chart.add_child(lone, lone),
        Err(DomainError::CycleDetected { .. })
    ));
}

#[rstest]
fn given_root_when_adding_anywhere_then_rejected(mut scenario: Scenario) {
    let other = scenario.chart.add_department("Other");
    assert_eq!(
        scenario.chart.add_child(other, scenario.root),
        Err(DomainError::RootNotMovable("Main Dept".to_string()))
    );
}

#[rstest]
fn given_employee_parent_when_adding_then_not_a_department(mut scenario: Scenario) {
    let intern = scenario.chart.add_employee("Ivy", "Intern", 1.0);
    assert_eq!(
        scenario.chart.add_child(scenario.charlie, intern),
        Err(DomainError::NotADepartment("Charlie".to_string()))
    );
}

#[rstest]
fn given_attached_employee_when_transferring_then_moves_between_departments(
    mut scenario: Scenario,
) {
    scenario
        .chart
        .transfer(scenario.alice, scenario.design)
        .unwrap();

    assert_eq!(scenario.chart.total_headcount(scenario.dev), 0);
    assert_eq!(scenario.chart.total_headcount(scenario.design), 2);
    assert_eq!(scenario.chart.total_headcount(scenario.root), 3);
    assert_eq!(scenario.chart.parent(scenario.alice), Some(scenario.design));
}

#[rstest]
fn given_detached_subtree_when_discarding_then_handles_go_stale(mut scenario: Scenario) {
    let units_before = scenario.chart.len();
    scenario.chart.remove_child(scenario.root, scenario.dev);

    assert!(scenario.chart.discard(scenario.dev));

    assert_eq!(scenario.chart.len(), units_before - 2);
    assert!(scenario.chart.node(scenario.alice).is_none());
    assert_eq!(scenario.chart.total_headcount(scenario.alice), 0);
    assert_eq!(scenario.chart.render(scenario.dev).count(), 0);
    assert!(!scenario.chart.remove_child(scenario.dev, scenario.alice));
    assert_eq!(
        scenario.chart.set_salary(scenario.alice, 1.0),
        Err(DomainError::UnknownUnit)
    );
}

#[rstest]
fn given_attached_unit_when_discarding_then_refused(mut scenario: Scenario) {
    assert!(!scenario.chart.discard(scenario.dev));
    assert!(!scenario.chart.discard(scenario.root));
    assert_eq!(scenario.chart.total_headcount(scenario.root), 3);
}

// ============================================================
// Search
// ============================================================

#[rstest]
fn given_every_employee_when_searching_then_returns_same_identity(scenario: Scenario) {
    for (name, id) in [
        ("Alice", scenario.alice),
        ("Bob", scenario.bob),
        ("Charlie", scenario.charlie),
    ] {
        assert_eq!(scenario.chart.find_by_name(scenario.root, name), Some(id));
    }
}

#[rstest]
#[case::unknown("Zoe")]
#[case::wrong_case("alice")]
#[case::department("Development")]
#[case::root_itself("Main Dept")]
fn given_name_without_matching_employee_when_searching_then_absent(
    scenario: Scenario,
    #[case] name: &str,
) {
    assert_eq!(scenario.chart.find_by_name(scenario.root, name), None);
    assert_eq!(
        scenario
            .chart
            .require_by_name(scenario.root, name, SearchScope::EmployeesOnly),
        Err(DomainError::NotFound(name.to_string()))
    );
}

#[rstest]
fn given_all_units_scope_when_searching_department_then_found(scenario: Scenario) {
    assert_eq!(
        scenario
            .chart
            .find_by_name_in(scenario.root, "Design", SearchScope::AllUnits),
        Some(scenario.design)
    );
    // the search root itself is still excluded
    assert_eq!(
        scenario
            .chart
            .find_by_name_in(scenario.root, "Main Dept", SearchScope::AllUnits),
        None
    );
}

#[rstest]
fn given_subtree_when_searching_then_only_below_it(scenario: Scenario) {
    assert_eq!(scenario.chart.find_by_name(scenario.design, "Alice"), None);
    assert_eq!(
        scenario.chart.find_by_name(scenario.design, "Bob"),
        Some(scenario.bob)
    );
}

// ============================================================
// Render and listing
// ============================================================

#[rstest]
fn given_scenario_when_rendering_then_preorder_indented_lines(scenario: Scenario) {
    let lines: Vec<String> = scenario.chart.render(scenario.root).collect();

    assert_eq!(
        lines,
        vec![
            "Department: Main Dept",
            "  Employee: Charlie, Position: Manager, Salary: 90000.0",
            "  Department: Development",
            "    Employee: Alice, Position: Developer, Salary: 70000.0",
            "  Department: Design",
            "    Employee: Bob, Position: Designer, Salary: 60000.0",
        ]
    );
}

#[rstest]
fn given_unchanged_tree_when_rendering_twice_then_identical(scenario: Scenario) {
    let first: Vec<String> = scenario.chart.render(scenario.root).collect();
    let second: Vec<String> = scenario.chart.render(scenario.root).collect();
    assert_eq!(first, second);

    let render = scenario.chart.render(scenario.root);
    let replay: Vec<String> = render.clone().collect();
    assert_eq!(render.collect::<Vec<_>>(), replay);
}

#[rstest]
fn given_employee_when_rendering_then_single_line(scenario: Scenario) {
    let lines: Vec<String> = scenario.chart.render(scenario.bob).collect();
    assert_eq!(
        lines,
        vec!["Employee: Bob, Position: Designer, Salary: 60000.0"]
    );
}

#[rstest]
fn given_scenario_when_listing_employees_then_preorder_names(scenario: Scenario) {
    let names: Vec<&str> = scenario.chart.employee_names(scenario.root).collect();
    assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);

    let again: Vec<&str> = scenario.chart.employee_names(scenario.root).collect();
    assert_eq!(names, again);
}

#[rstest]
fn given_empty_subdepartment_when_listing_then_skipped(mut scenario: Scenario) {
    let empty = scenario.chart.add_department("Empty");
    scenario.chart.add_child(scenario.dev, empty).unwrap();

    let names: Vec<&str> = scenario.chart.employee_names(scenario.dev).collect();
    assert_eq!(names, vec!["Alice"]);
    assert_eq!(scenario.chart.depth(scenario.root), 3);
}
