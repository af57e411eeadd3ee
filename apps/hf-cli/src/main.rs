use clap::{Parser, Subcommand};
use hf_app::{AppResult, RunOptions, RunResponse, project_service, run_service};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "hvacflow CLI - Steam humidifier simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List humidifiers in a project
    Humidifiers {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Show the air inlet and outlet nodes of a humidifier
    Lookup {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Humidifier name
        humidifier: String,
    },
    /// Run the project's fixed-step simulation
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Override the number of steps
        #[arg(long)]
        steps: Option<usize>,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export one humidifier variable as CSV
    ExportSeries {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Humidifier name
        humidifier: String,
        /// Variable name (e.g., outlet_hum_rat, water_add_kgps, gas_power_w)
        variable: String,
        /// Override the number of steps
        #[arg(long)]
        steps: Option<usize>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Humidifiers { project_path } => cmd_humidifiers(&project_path),
        Commands::Lookup {
            project_path,
            humidifier,
        } => cmd_lookup(&project_path, &humidifier),
        Commands::Run {
            project_path,
            steps,
            json,
        } => cmd_run(&project_path, steps, json),
        Commands::ExportSeries {
            project_path,
            humidifier,
            variable,
            steps,
            output,
        } => cmd_export_series(
            &project_path,
            &humidifier,
            &variable,
            steps,
            output.as_deref(),
        ),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_humidifiers(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let units = project_service::list_humidifiers(&project);

    if units.is_empty() {
        println!("No humidifiers found in project");
    } else {
        println!("Humidifiers in project:");
        for unit in units {
            let tank = if unit.tank_fed { ", tank-fed" } else { "" };
            println!(
                "  {} - {} ({} -> {}{})",
                unit.name, unit.kind, unit.air_inlet_node, unit.air_outlet_node, tank
            );
        }
    }
    Ok(())
}

fn cmd_lookup(project_path: &Path, humidifier: &str) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let (inlet, outlet) = hf_app::lookup_nodes(&project, humidifier)?;
    println!("{humidifier}");
    println!("  Air inlet node:  {inlet}");
    println!("  Air outlet node: {outlet}");
    Ok(())
}

fn load_and_run(project_path: &Path, steps: Option<usize>) -> AppResult<RunResponse> {
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    run_service::run_project(&project, &RunOptions { steps })
}

fn cmd_run(project_path: &Path, steps: Option<usize>, json: bool) -> AppResult<()> {
    let response = load_and_run(project_path, steps)?;

    if json {
        let text = serde_json::to_string_pretty(&response)
            .map_err(|e| hf_app::AppError::Simulation(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    let summary = &response.summary;
    println!(
        "✓ Simulation completed: {} steps of {:.0} s",
        summary.steps, summary.time_step_s
    );
    for totals in &summary.totals {
        println!("\n{}", totals.name);
        println!("  Hours on:        {:.2}", totals.hours_on);
        println!("  Water used:      {:.6} m3", totals.water_m3);
        if totals.starved_water_m3 > 0.0 {
            println!("  Starved supply:  {:.6} m3", totals.starved_water_m3);
        }
        println!("  Electricity:     {:.3} kWh", totals.electric_energy_j / 3.6e6);
        if totals.gas_energy_j > 0.0 {
            println!("  Gas:             {:.3} kWh", totals.gas_energy_j / 3.6e6);
        }
    }

    if !response.diagnostics.is_empty() {
        println!("\nDiagnostics:");
        for line in &response.diagnostics {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_export_series(
    project_path: &Path,
    humidifier: &str,
    variable: &str,
    steps: Option<usize>,
    output: Option<&Path>,
) -> AppResult<()> {
    let response = load_and_run(project_path, steps)?;
    let series = response.series(humidifier, variable)?;

    // Build CSV
    let mut csv = String::from("time_s,value\n");
    for (t, val) in &series {
        csv.push_str(&format!("{},{}\n", t, val));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
