use clap::{Parser, ValueEnum};
use sweeper::experiment::{run_experiment, ExperimentConfig};
use sweeper::{AgentOptions, Strategy};

#[derive(Parser, Debug)]
#[command(name = "sweeper", about = "Run batches of autonomous Minesweeper trials")]
struct Args {
    /// Board dimension (the board is dim x dim).
    #[arg(short, long, default_value_t = 10)]
    dim: u32,

    /// Number of mines per board.
    #[arg(short, long, default_value_t = 10)]
    mines: u32,

    /// Number of independent trials.
    #[arg(short, long, default_value_t = 100)]
    trials: usize,

    /// Solving strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Improved)]
    strategy: StrategyArg,

    /// Fold the board-wide mine count into every inference pass.
    #[arg(long)]
    global_clue: bool,

    /// Guess the most-constrained cell instead of a random one.
    #[arg(long)]
    heuristic: bool,

    /// Log each inference pass and board state.
    #[arg(long)]
    verbose: bool,

    /// Base RNG seed for reproducible batches.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    Basic,
    Improved,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Basic => Strategy::Basic,
            StrategyArg::Improved => Strategy::Improved,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = ExperimentConfig {
        dim: args.dim,
        mine_count: args.mines,
        trials: args.trials,
        options: AgentOptions {
            strategy: args.strategy.into(),
            use_global_clue: args.global_clue,
            use_next_cell_heuristic: args.heuristic,
            verbose_trace: args.verbose,
        },
        seed: args.seed,
    };

    match run_experiment(&config) {
        Ok(report) => {
            println!(
                "Trials: {} completed, {} failed",
                report.completed(),
                report.failed()
            );
            println!("Average score: {:.2}", report.mean_score());
        }
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    }
}
