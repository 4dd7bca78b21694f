use std::process::ExitCode;

use clap::Parser;
use pswarm::{observers::TracingObserver, prelude::*};
use tracing_subscriber::EnvFilter;

/// Minimize one of the benchmark problems with a multithreaded particle swarm.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of particles (must be divisible by the number of threads)
    #[arg(short = 'p', long = "particles", default_value_t = 100)]
    particles: usize,
    /// Number of iterations
    #[arg(short = 'i', long, default_value_t = 100)]
    iterations: usize,
    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = 1)]
    threads: usize,
    /// The function to optimize: 0 = sphere, 1 = rosenbrock, 2 = rastrigin, 3 = schwefel
    #[arg(short = 'f', long, default_value_t = 0)]
    function: usize,
    /// Dimension of the search space
    #[arg(short = 'd', long, default_value_t = 2)]
    dimensions: usize,
    /// Inertia weight
    #[arg(short = 'a', default_value_t = 0.72984)]
    a: Float,
    /// Sets both attraction coefficients
    #[arg(short = 'b')]
    b: Option<Float>,
    /// Local attraction coefficient (overrides -b)
    #[arg(long)]
    b_loc: Option<Float>,
    /// Global attraction coefficient (overrides -b)
    #[arg(long)]
    b_glob: Option<Float>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

/// Build the problem and optimizer from the command line, rejecting any configuration error
/// before work begins.
fn build(args: &Args) -> Result<(Problem, PSO), PsoError> {
    let problem = Problem::try_from(args.function)?;
    let pso = PSO::new()
        .setup(|c| {
            c.with_n_particles(args.particles)
                .with_iterations(args.iterations)
                .with_n_threads(args.threads)
                .with_dimension(args.dimensions)
                .with_a(args.a);
            if let Some(b) = args.b {
                c.with_b(b);
            }
            if let Some(b_loc) = args.b_loc {
                c.with_b_loc(b_loc);
            }
            if let Some(b_glob) = args.b_glob {
                c.with_b_glob(b_glob);
            }
            if let Some(seed) = args.seed {
                c.with_seed(seed);
            }
            c
        })
        .with_observer(TracingObserver::build());
    pso.config().validate()?;
    Ok((problem, pso))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let (problem, pso) = match build(&args) {
        Ok(built) => built,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = pso.config();
    println!(
        "threads: {}, particles: {}, iterations: {}, function: {}",
        config.n_threads(),
        config.n_particles(),
        config.iterations(),
        problem
    );
    println!(
        "a: {}, b_loc: {} b_glob: {}",
        config.coefficients().a,
        config.coefficients().b_loc,
        config.coefficients().b_glob
    );

    match pso.run(&problem) {
        Ok(status) => {
            println!("{}", status);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
