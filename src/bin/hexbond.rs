use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hexbond::generator::{Generator, GeneratorConfig};
use hexbond::solver::LazySolver;
use hexbond::template;

/// Caps the `solve` subcommand's enumeration; named but otherwise unused in
/// the original C generator (`#define MAX_SOLUTIONS 1000`), picked up here as
/// a pragmatic bound on `count_solutions` when it is driven directly instead
/// of through the generator's own `max_k = 2`.
const MAX_SOLUTIONS: usize = 1000;

#[derive(Parser)]
#[command(author, version, about = "SAT-based chemical-bond puzzle generator/solver", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perturb a template's valence labels until exactly one solution remains
    Generate {
        /// Path to an ASCII puzzle template
        template: PathBuf,
        /// Weight for the H slot (default 1)
        #[arg(long, default_value_t = 1)]
        h: u32,
        /// Weight for the O slot (default 5)
        #[arg(long, default_value_t = 5)]
        o: u32,
        /// Weight for the N slot (default 8)
        #[arg(long, default_value_t = 8)]
        n: u32,
        /// Weight for the C slot (default 3)
        #[arg(long, default_value_t = 3)]
        c: u32,
        /// Where to write the resulting puzzle text
        #[arg(long, default_value = "puzzle.txt")]
        output: PathBuf,
        /// Safety cap on generator iterations (none by default)
        #[arg(long)]
        max_iterations: Option<u64>,
    },
    /// Enumerate up to MAX_SOLUTIONS connected solutions for a fixed template
    Solve {
        /// Path to an ASCII puzzle template
        template: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            template,
            h,
            o,
            n,
            c,
            output,
            max_iterations,
        } => {
            let graph = template::load(&template)
                .with_context(|| format!("loading template {}", template.display()))?;
            let config = GeneratorConfig {
                weights: [0, h, o, n, c],
                output_path: output.clone(),
                max_iterations,
                ..GeneratorConfig::default()
            };
            let mut generator = Generator::new(graph, config);
            let report = generator.run().context("running the generator")?;
            println!(
                "converged after {} iterations; wrote {}",
                report.iterations,
                output.display()
            );
        }
        Commands::Solve { template } => {
            let graph = template::load(&template)
                .with_context(|| format!("loading template {}", template.display()))?;
            let mut solver = LazySolver::new();
            let result = solver
                .count_solutions(&graph, MAX_SOLUTIONS)
                .context("solving the template")?;
            if result.solution_count() == 0 {
                println!("no connected solution exists for this labeling");
            } else {
                println!("found {} connected solution(s)", result.solution_count());
                let mut with_solution = graph.clone();
                LazySolver::apply_solution(&mut with_solution, &result.solutions[0]);
                let mut out = Vec::new();
                hexbond::sink::write_puzzle(&mut out, &with_solution)?;
                print!("{}", String::from_utf8_lossy(&out));
            }
        }
    }

    Ok(())
}

