//! Domain entities: the two kinds of organizational unit

use std::fmt;

/// Individual contributor. Always a leaf of the org tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    name: String,
    position: String,
    salary: f64,
}

impl Employee {
    pub fn new(name: impl Into<String>, position: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            salary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn set_salary(&mut self, salary: f64) {
        self.salary = salary;
    }
}

/// Grouping node. Children live in the owning [`OrgChart`](super::OrgChart) node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    name: String,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Payload of an org tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum OrgUnit {
    Employee(Employee),
    Department(Department),
}

impl OrgUnit {
    pub fn name(&self) -> &str {
        match self {
            OrgUnit::Employee(e) => e.name(),
            OrgUnit::Department(d) => d.name(),
        }
    }

    pub fn is_department(&self) -> bool {
        matches!(self, OrgUnit::Department(_))
    }

    pub fn as_employee(&self) -> Option<&Employee> {
        match self {
            OrgUnit::Employee(e) => Some(e),
            OrgUnit::Department(_) => None,
        }
    }

    pub fn as_employee_mut(&mut self) -> Option<&mut Employee> {
        match self {
            OrgUnit::Employee(e) => Some(e),
            OrgUnit::Department(_) => None,
        }
    }

    /// This unit's own share of the headcount, children excluded.
    pub fn own_headcount(&self) -> usize {
        match self {
            OrgUnit::Employee(_) => 1,
            OrgUnit::Department(_) => 0,
        }
    }

    /// One-line description without indentation.
    pub fn describe(&self, salary_precision: usize) -> String {
        match self {
            OrgUnit::Employee(e) => format!(
                "Employee: {}, Position: {}, Salary: {:.*}",
                e.name(),
                e.position(),
                salary_precision,
                e.salary()
            ),
            OrgUnit::Department(d) => format!("Department: {}", d.name()),
        }
    }
}

impl From<Employee> for OrgUnit {
    fn from(e: Employee) -> Self {
        OrgUnit::Employee(e)
    }
}

impl From<Department> for OrgUnit {
    fn from(d: Department) -> Self {
        OrgUnit::Department(d)
    }
}

impl fmt::Display for OrgUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(1))
    }
}

/// Which unit kinds a name search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Only employees match; department names are walked through but never returned.
    #[default]
    EmployeesOnly,
    /// Departments below the search root match as well.
    AllUnits,
}

impl SearchScope {
    pub fn accepts(self, unit: &OrgUnit) -> bool {
        match self {
            SearchScope::EmployeesOnly => !unit.is_department(),
            SearchScope::AllUnits => true,
        }
    }
}
