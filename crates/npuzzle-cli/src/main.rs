use clap::Parser;
use npuzzle_core::{Board, Generator, Solver, SolverConfig};
use std::process::ExitCode;

/// Solve 8-puzzle instances with A* and print the move sequence.
#[derive(Parser)]
#[command(name = "npuzzle", version, about)]
struct Args {
    /// Start arrangement as nine digits, row by row (0 is the blank)
    #[arg(long, default_value = "124356807")]
    start: String,

    /// Goal arrangement in the same nine-digit form
    #[arg(long, default_value = "012345678")]
    goal: String,

    /// Ignore --start and scramble this many random slides away from the goal
    #[arg(long)]
    scramble: Option<usize>,

    /// Seed for --scramble, for reproducible instances
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after expanding this many arrangements
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Print the solution as JSON instead of boards
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let goal = Board::from_string(&args.goal)?;
    let start = match args.scramble {
        Some(moves) => {
            let mut generator = match args.seed {
                Some(seed) => Generator::with_seed(seed),
                None => Generator::new(),
            };
            generator.scramble(&goal, moves)
        }
        None => Board::from_string(&args.start)?,
    };

    let solver = Solver::with_config(SolverConfig {
        max_expansions: args.max_expansions,
    });
    let solution = solver.solve(&start, &goal)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
        return Ok(());
    }

    println!("Start:\n{start}\n");
    println!("Goal:\n{goal}\n");

    for (i, dir) in solution.moves.iter().enumerate() {
        println!("{}. {dir}\n{}\n", i + 1, solution.path[i + 1]);
    }

    println!("Goal state reached.");
    println!("Total moves: {}", solution.move_count());
    println!(
        "Expanded {} arrangements (generated {}).",
        solution.stats.expanded, solution.stats.generated
    );
    Ok(())
}
