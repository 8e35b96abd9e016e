//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Composite org charts: hierarchy, headcount, budget and employee search
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Chart file (TOML); the built-in demo chart if omitted
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub chart: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the hierarchy, one line per unit
    Show {
        /// Start at this department instead of the root
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Print the hierarchy as a tree
    Tree {
        /// Start at this department instead of the root
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Count employees
    Headcount {
        /// Count below this department instead of the root
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Sum salaries
    Budget {
        /// Sum below this department instead of the root
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Look up an employee by exact name
    Find {
        /// Employee name (case-sensitive)
        name: String,
        /// Match department names as well
        #[arg(long)]
        departments: bool,
    },

    /// List every employee name
    Employees {
        /// List below this department instead of the root
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Change an employee's salary and show the updated budget
    Raise {
        /// Employee name
        name: String,
        /// New salary
        salary: f64,
    },

    /// Run the narrated demo scenario
    Demo,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
