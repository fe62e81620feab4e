//! Basic example of using the 8-puzzle engine

use npuzzle_core::{Board, Generator, Solver};

fn main() {
    let goal = Board::from_string("012345678").expect("well-formed goal");

    // Scramble a solvable instance
    println!("Scrambling 25 slides away from the goal...\n");
    let mut generator = Generator::new();
    let start = generator.scramble(&goal, 25);

    println!("Scrambled puzzle:");
    println!("{start}\n");

    // Solve it
    let solver = Solver::new();
    match solver.solve(&start, &goal) {
        Ok(solution) => {
            println!("Solved in {} moves:", solution.move_count());
            for (dir, board) in solution.moves.iter().zip(&solution.path[1..]) {
                println!("{dir}:\n{board}\n");
            }
            println!(
                "Expanded {} arrangements (generated {}).",
                solution.stats.expanded, solution.stats.generated
            );
        }
        Err(e) => println!("No solution: {e}"),
    }
}
