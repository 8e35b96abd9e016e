use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{demo_chart, load_chart, run_demo, OrgReport};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{OrgChart, SearchScope, TreeNodeConvert, UnitId};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let chart_dir = cli.chart.as_deref().and_then(Path::parent);
    let settings = Settings::load(chart_dir)?;
    debug!("settings: {:?}", settings);

    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `orgtree --help`".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => _completion(*shell),
        Commands::Config => _config(&settings),
        Commands::Demo => _demo(&settings),
        Commands::Show { unit } => {
            let chart = open_chart(cli, &settings)?;
            _show(&chart, &settings, unit.as_deref())
        }
        Commands::Tree { unit } => {
            let chart = open_chart(cli, &settings)?;
            _tree(&chart, &settings, unit.as_deref())
        }
        Commands::Headcount { unit } => {
            let chart = open_chart(cli, &settings)?;
            let id = resolve_unit(&chart, unit.as_deref())?;
            let report = OrgReport::new(&chart, settings.render_style());
            output::info(&report.headcount_line(id));
            Ok(())
        }
        Commands::Budget { unit } => {
            let chart = open_chart(cli, &settings)?;
            let id = resolve_unit(&chart, unit.as_deref())?;
            let report = OrgReport::new(&chart, settings.render_style());
            output::info(&report.budget_line(id));
            Ok(())
        }
        Commands::Find { name, departments } => {
            let chart = open_chart(cli, &settings)?;
            let scope = if *departments {
                SearchScope::AllUnits
            } else {
                settings.search_scope()
            };
            let report = OrgReport::new(&chart, settings.render_style());
            for line in report.search(chart.root(), name, scope) {
                output::info(&line);
            }
            Ok(())
        }
        Commands::Employees { unit } => {
            let chart = open_chart(cli, &settings)?;
            let id = resolve_unit(&chart, unit.as_deref())?;
            let report = OrgReport::new(&chart, settings.render_style());
            for line in report.roster(id) {
                output::info(&line);
            }
            Ok(())
        }
        Commands::Raise { name, salary } => {
            let mut chart = open_chart(cli, &settings)?;
            _raise(&mut chart, &settings, name, *salary)
        }
    }
}

/// Chart from `--chart`, else from settings, else the demo chart.
#[instrument(level = "debug", skip(cli, settings))]
fn open_chart(cli: &Cli, settings: &Settings) -> CliResult<OrgChart> {
    match cli.chart.as_ref().or(settings.default_chart.as_ref()) {
        Some(path) => Ok(load_chart(path, settings)?),
        None => {
            debug!("no chart given, using demo chart");
            Ok(demo_chart()?)
        }
    }
}

/// The root, or the unit below it named `name` (departments included).
fn resolve_unit(chart: &OrgChart, name: Option<&str>) -> CliResult<UnitId> {
    let root = chart.root();
    match name {
        None => Ok(root),
        Some(n) if chart.name(root) == Some(n) => Ok(root),
        Some(n) => Ok(chart.require_by_name(root, n, SearchScope::AllUnits)?),
    }
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

#[instrument(skip(settings))]
fn _demo(settings: &Settings) -> CliResult<()> {
    for line in run_demo(settings)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(chart, settings))]
fn _show(chart: &OrgChart, settings: &Settings, unit: Option<&str>) -> CliResult<()> {
    let id = resolve_unit(chart, unit)?;
    for line in chart.render_with(id, &settings.render_style()) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(chart, settings))]
fn _tree(chart: &OrgChart, settings: &Settings, unit: Option<&str>) -> CliResult<()> {
    let id = resolve_unit(chart, unit)?;
    if let Some(name) = chart.name(id) {
        output::header(name);
    }
    output::info(&chart.to_tree_string(id, &settings.render_style()));
    Ok(())
}

#[instrument(skip(chart, settings))]
fn _raise(chart: &mut OrgChart, settings: &Settings, name: &str, salary: f64) -> CliResult<()> {
    if salary < 0.0 {
        if settings.reject_negative_salary {
            return Err(CliError::InvalidArgs(format!(
                "negative salary {} for '{}'",
                salary, name
            )));
        }
        output::warning(&format!("negative salary {} for '{}'", salary, name));
    }

    let root = chart.root();
    let id = chart.require_by_name(root, name, SearchScope::EmployeesOnly)?;
    chart.set_salary(id, salary)?;
    output::action("Raised", &format!("{} to {}", name, salary));

    let report = OrgReport::new(chart, settings.render_style());
    output::info(&report.updated_budget_line(root));
    Ok(())
}
