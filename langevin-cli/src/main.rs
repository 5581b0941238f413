use clap::{Parser, Subcommand};
use langevin_core::{
    analyze_config, run_config, ForceConfig, SimulationConfig, SimulationResult,
};
use std::path::{Path, PathBuf};

mod controls;
mod view_app;

#[derive(Parser)]
#[command(name = "langevin")]
#[command(about = "Langevin dynamics of a particle in a double-well potential", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headless and print the final state
    Run {
        /// Path to the TOML scenario file
        file: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Check a scenario for errors and warnings
    Check {
        /// Path to the TOML scenario file
        file: PathBuf,
    },
    /// Open the interactive viewer, reloading the scenario when it changes
    View {
        /// Path to the TOML scenario file
        file: PathBuf,
    },
}

#[derive(clap::Args)]
struct Overrides {
    /// Number of steps to take
    #[arg(long)]
    steps: Option<usize>,
    /// Seed for the noise generator
    #[arg(long)]
    seed: Option<u64>,
    /// Initial position, clamped to [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f64>,
    /// Initial velocity, clamped to [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    v: Option<f64>,
    /// Speed index; the time step becomes 0.025 * 10^(index/10)
    #[arg(long, allow_hyphen_values = true)]
    speed: Option<i32>,
}

impl Overrides {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(x) = self.x {
            config.initial.position = controls::clamp_position(x);
        }
        if let Some(v) = self.v {
            config.initial.velocity = controls::clamp_velocity(v);
        }
        if let Some(index) = self.speed {
            config.forces.dt = controls::time_step_from_index(index);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run { file, overrides } => run_file(&file, &overrides),
        Commands::Check { file } => check_file(&file),
        Commands::View { file } => view_file(file),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_file(file: &Path, overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SimulationConfig::from_file(file)?;
    overrides.apply(&mut config);

    let diagnostics = analyze_config(&config);
    for diagnostic in diagnostics.iter() {
        log::warn!("{}", diagnostic);
    }

    let result = run_config(&config)?;
    print_result(&config.forces, &result);
    Ok(())
}

fn check_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimulationConfig::from_file(file)?;
    let diagnostics = analyze_config(&config);
    print!("{}", diagnostics);
    if diagnostics.has_errors() {
        return Err(format!("{} failed checks", file.display()).into());
    }
    if diagnostics.is_empty() {
        println!("{}: ok", file.display());
    }
    Ok(())
}

fn view_file(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "langevin",
        options,
        Box::new(move |cc| Ok(Box::new(view_app::ViewApp::new(file, cc)))),
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

fn print_result(forces: &ForceConfig, result: &SimulationResult) {
    println!("steps = {}", result.steps);
    println!("dt = {}", forces.dt);
    println!("position = {}", result.final_state.position);
    println!("velocity = {}", result.final_state.velocity);
    println!("initial_energy = {}", result.initial_energy);
    println!("final_energy = {}", result.final_energy);
}
