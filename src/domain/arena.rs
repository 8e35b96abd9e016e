use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{Department, Employee, OrgUnit, SearchScope};
use crate::domain::error::{DomainError, DomainResult};

/// Handle to a unit stored in an [`OrgChart`].
///
/// Handles are generational: once a unit is discarded its handle never
/// resolves again, even if the slot is reused.
pub type UnitId = Index;

/// Tree node in the arena-based org chart.
#[derive(Debug)]
pub struct OrgNode {
    unit: OrgUnit,
    /// Non-owning back reference, None for the root and for detached units
    parent: Option<UnitId>,
    /// Owned children in insertion order
    children: Vec<UnitId>,
}

impl OrgNode {
    fn new(unit: OrgUnit) -> Self {
        Self {
            unit,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn unit(&self) -> &OrgUnit {
        &self.unit
    }

    pub fn name(&self) -> &str {
        self.unit.name()
    }

    pub fn parent(&self) -> Option<UnitId> {
        self.parent
    }

    pub fn children(&self) -> &[UnitId] {
        &self.children
    }
}

/// Arena-backed composite of departments and employees.
///
/// The chart owns every unit. Departments reference their children by
/// handle and each child points back at its single parent, so a unit can
/// never be attached twice and no department can become its own descendant.
/// Units created but not (or no longer) attached are detached: they stay
/// addressable through their handle until [`OrgChart::discard`] frees them.
#[derive(Debug)]
pub struct OrgChart {
    arena: Arena<OrgNode>,
    root: UnitId,
}

impl OrgChart {
    /// Creates a chart whose root is a department called `root_name`.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(OrgNode::new(Department::new(root_name).into()));
        Self { arena, root }
    }

    pub fn root(&self) -> UnitId {
        self.root
    }

    /// Number of live units, detached ones included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self, name, position))]
    pub fn add_employee(
        &mut self,
        name: impl Into<String>,
        position: impl Into<String>,
        salary: f64,
    ) -> UnitId {
        self.arena
            .insert(OrgNode::new(Employee::new(name, position, salary).into()))
    }

    #[instrument(level = "trace", skip(self, name))]
    pub fn add_department(&mut self, name: impl Into<String>) -> UnitId {
        self.arena.insert(OrgNode::new(Department::new(name).into()))
    }

    pub fn node(&self, id: UnitId) -> Option<&OrgNode> {
        self.arena.get(id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&OrgUnit> {
        self.node(id).map(OrgNode::unit)
    }

    pub fn name(&self, id: UnitId) -> Option<&str> {
        self.node(id).map(OrgNode::name)
    }

    pub fn employee(&self, id: UnitId) -> Option<&Employee> {
        self.unit(id).and_then(OrgUnit::as_employee)
    }

    /// Mutable access to an employee; changes are visible to every ancestor.
    pub fn employee_mut(&mut self, id: UnitId) -> Option<&mut Employee> {
        self.arena
            .get_mut(id)
            .and_then(|node| node.unit.as_employee_mut())
    }

    /// Children of `id` in insertion order; empty for employees and stale handles.
    pub fn children(&self, id: UnitId) -> &[UnitId] {
        self.node(id).map(OrgNode::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: UnitId) -> Option<UnitId> {
        self.node(id).and_then(OrgNode::parent)
    }

    /// True when `id` is the root or hangs below it.
    pub fn is_attached(&self, id: UnitId) -> bool {
        let mut current = Some(id);
        while let Some(idx) = current {
            if idx == self.root {
                return true;
            }
            current = self.parent(idx);
        }
        false
    }

    fn require_node(&self, id: UnitId) -> DomainResult<&OrgNode> {
        self.node(id).ok_or(DomainError::UnknownUnit)
    }

    /// Checks everything `add_child` and `transfer` need except the current parent.
    fn check_attach(&self, department: UnitId, child: UnitId) -> DomainResult<()> {
        let dept_node = self.require_node(department)?;
        let child_node = self.require_node(child)?;

        if !dept_node.unit.is_department() {
            return Err(DomainError::NotADepartment(dept_node.name().to_string()));
        }
        if child == self.root {
            return Err(DomainError::RootNotMovable(child_node.name().to_string()));
        }

        let mut current = Some(department);
        while let Some(idx) = current {
            if idx == child {
                return Err(DomainError::CycleDetected {
                    child: child_node.name().to_string(),
                    department: dept_node.name().to_string(),
                });
            }
            current = self.parent(idx);
        }
        Ok(())
    }

    fn link(&mut self, department: UnitId, child: UnitId) {
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(department);
        }
        if let Some(node) = self.arena.get_mut(department) {
            node.children.push(child);
        }
    }

    /// Appends `child` to the end of `department`'s children.
    ///
    /// Fails if either handle is stale, if `department` is an employee, if
    /// `child` already has a parent, or if the link would close a cycle.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, department: UnitId, child: UnitId) -> DomainResult<()> {
        self.check_attach(department, child)?;
        if let Some(parent) = self.parent(child) {
            return Err(DomainError::AlreadyAttached {
                child: self.name(child).unwrap_or_default().to_string(),
                parent: self.name(parent).unwrap_or_default().to_string(),
            });
        }
        self.link(department, child);
        Ok(())
    }

    /// Detaches `child` from `department`.
    ///
    /// Returns false, and changes nothing, when `child` is not a direct
    /// child of `department` or either handle is stale. The detached
    /// subtree stays in the chart until discarded.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, department: UnitId, child: UnitId) -> bool {
        let Some(dept_node) = self.arena.get_mut(department) else {
            return false;
        };
        let Some(pos) = dept_node.children.iter().position(|&c| c == child) else {
            return false;
        };
        dept_node.children.remove(pos);
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
        }
        true
    }

    /// Moves `child` under `department`, detaching it from its current parent.
    #[instrument(level = "debug", skip(self))]
    pub fn transfer(&mut self, child: UnitId, department: UnitId) -> DomainResult<()> {
        self.check_attach(department, child)?;
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child);
        }
        self.link(department, child);
        Ok(())
    }

    /// Frees a detached unit and everything below it.
    ///
    /// Returns false for the root, for units that still have a parent and
    /// for stale handles.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: UnitId) -> bool {
        if id == self.root || self.parent(id).is_some() || self.node(id).is_none() {
            return false;
        }
        let doomed: Vec<UnitId> = self.descendants(id).map(|(idx, _, _)| idx).collect();
        debug!("discarding {} units", doomed.len());
        for idx in doomed {
            self.arena.remove(idx);
        }
        true
    }

    #[instrument(level = "debug", skip(self))]
    pub fn set_salary(&mut self, employee: UnitId, salary: f64) -> DomainResult<()> {
        let node = self.arena.get_mut(employee).ok_or(DomainError::UnknownUnit)?;
        match node.unit.as_employee_mut() {
            Some(e) => {
                e.set_salary(salary);
                Ok(())
            }
            None => Err(DomainError::NotAnEmployee(node.name().to_string())),
        }
    }

    /// Pre-order walk of `id` and everything below it, with depth relative to `id`.
    pub fn descendants(&self, id: UnitId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn total_headcount(&self, id: UnitId) -> usize {
        self.descendants(id)
            .map(|(_, _, node)| node.unit.own_headcount())
            .sum()
    }

    /// Salary for an employee, otherwise the children's budgets summed in
    /// insertion order, so a department's total always equals the sum of
    /// its children's totals.
    #[instrument(level = "debug", skip(self))]
    pub fn total_budget(&self, id: UnitId) -> f64 {
        self.subtree_budget(id)
    }

    fn subtree_budget(&self, id: UnitId) -> f64 {
        let Some(node) = self.node(id) else {
            return 0.0;
        };
        match &node.unit {
            OrgUnit::Employee(e) => e.salary(),
            OrgUnit::Department(_) => node
                .children
                .iter()
                .fold(0.0, |total, &child| total + self.subtree_budget(child)),
        }
    }

    /// Height of the subtree at `id`; 0 for stale handles.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: UnitId) -> usize {
        self.descendants(id)
            .map(|(_, depth, _)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// First employee named `name` strictly below `department`, in pre-order.
    ///
    /// Department names are never matched; use [`OrgChart::find_by_name_in`]
    /// with [`SearchScope::AllUnits`] for that.
    pub fn find_by_name(&self, department: UnitId, name: &str) -> Option<UnitId> {
        self.find_by_name_in(department, name, SearchScope::EmployeesOnly)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn find_by_name_in(
        &self,
        department: UnitId,
        name: &str,
        scope: SearchScope,
    ) -> Option<UnitId> {
        self.descendants(department)
            .skip(1)
            .find(|(_, _, node)| node.name() == name && scope.accepts(&node.unit))
            .map(|(idx, _, _)| idx)
    }

    /// Like [`OrgChart::find_by_name_in`] but absence is an error.
    pub fn require_by_name(
        &self,
        department: UnitId,
        name: &str,
        scope: SearchScope,
    ) -> DomainResult<UnitId> {
        self.find_by_name_in(department, name, scope)
            .ok_or_else(|| DomainError::NotFound(name.to_string()))
    }
}

/// Depth-first pre-order iterator over a subtree.
#[derive(Clone)]
pub struct Descendants<'a> {
    chart: &'a OrgChart,
    stack: Vec<(UnitId, usize)>,
}

impl<'a> Descendants<'a> {
    fn new(chart: &'a OrgChart, start: UnitId) -> Self {
        Self {
            chart,
            stack: vec![(start, 0)],
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (UnitId, usize, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.chart.node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, depth, node));
            }
        }
        None
    }
}
