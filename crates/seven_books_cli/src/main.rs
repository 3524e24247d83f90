mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seven_books_core::{derivatives, SevenBooksConfig};
use seven_books_sim::{compare, linspace, simulate, Rk4, Scenario};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(
        short,
        long,
        global = true,
        env = "SEVEN_BOOKS_CONFIG",
        default_value = "seven_books.toml"
    )]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Integrate one trajectory from the configured initial state
    Simulate {
        /// Start time of the intervention pulse on facet 1
        #[arg(long)]
        nudge_time: Option<f64>,

        /// End of the simulated time span
        #[arg(long)]
        t_end: Option<f64>,

        /// Number of query times in [0, t_end]
        #[arg(long)]
        samples: Option<usize>,

        /// Print the whole trajectory as JSON instead of the final state
        #[arg(long)]
        json: bool,
    },

    /// Compare no intervention against early, right and late nudges
    Compare,

    /// Evaluate the vector field once
    Derive {
        /// Comma-separated state: x1,x2,x3,dwelling
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        state: Vec<f64>,

        #[arg(long, default_value_t = 0.0)]
        time: f64,

        /// Start time of the intervention pulse on facet 1
        #[arg(long)]
        nudge_time: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = SevenBooksConfig::load_or_default(&args.config)?;

    match args.command {
        Command::Simulate {
            nudge_time,
            t_end,
            samples,
            json,
        } => {
            if nudge_time.is_some() {
                config.model.nudge_time = nudge_time;
            }
            if let Some(t) = t_end {
                config.simulation.t_end = t;
            }
            if let Some(n) = samples {
                config.simulation.samples = n;
            }
            let params = config.params()?;
            info!(
                nudge_time = ?params.forcing().start(),
                t_end = config.simulation.t_end,
                "Simulating..."
            );
            let trajectory =
                simulate(&params, &config.simulation).context("Simulation failed")?;

            if json {
                println!("{}", serde_json::to_string(&trajectory)?);
            } else if let Some(last) = trajectory.final_state() {
                print!("{}", report::final_state(last));
            } else {
                println!("No samples requested.");
            }
        }
        Command::Compare => {
            let params = config.params()?;
            let sim = &config.simulation;
            let times = linspace(0.0, sim.t_end, sim.samples);
            info!("Comparing intervention timings...");
            let outcomes = compare(
                &params,
                &Scenario::standard_set(),
                sim.initial_state,
                &times,
                &Rk4::new(sim.substeps),
            )
            .context("Scenario comparison failed")?;
            print!("{}", report::comparison(&outcomes));
        }
        Command::Derive {
            state,
            time,
            nudge_time,
        } => {
            if nudge_time.is_some() {
                config.model.nudge_time = nudge_time;
            }
            let params = config.params()?;
            let d = derivatives(&state, time, &params)?;
            print!("{}", report::derivatives(&d));
        }
    }

    Ok(())
}
