#![cfg(feature = "test-utils")]

use sweeper::solver::test_utils::{validate_strategy, TestBoardConfig, TestBoardGenerator};
use sweeper::{Agent, AgentOptions, Strategy};

#[test]
fn test_basic_strategy_extensive() {
    let config = TestBoardConfig {
        dim: 16,
        mine_density: 0.15,
        revealed_fraction: 0.3,
    };
    let mut generator = TestBoardGenerator::with_seed(config, 12345);

    let mut failures = 0;
    for (idx, board) in generator.generate_batch(2_000).iter().enumerate() {
        if !validate_strategy(Strategy::Basic, board) {
            println!("Failure on test case {}", idx);
            failures += 1;
        }
    }

    assert_eq!(
        failures, 0,
        "Basic strategy failed on {} out of 2,000 boards",
        failures
    );
}

#[test]
fn test_improved_strategy_extensive() {
    let config = TestBoardConfig {
        dim: 16,
        mine_density: 0.15,
        revealed_fraction: 0.3,
    };
    let mut generator = TestBoardGenerator::with_seed(config, 12345);

    let mut failures = 0;
    for (idx, board) in generator.generate_batch(500).iter().enumerate() {
        if !validate_strategy(Strategy::Improved, board) {
            println!("Failure on test case {}", idx);
            failures += 1;
        }
    }

    assert_eq!(
        failures, 0,
        "Improved strategy failed on {} out of 500 boards",
        failures
    );
}

#[test]
fn test_agents_complete_generated_boards() {
    let config = TestBoardConfig {
        dim: 10,
        mine_density: 0.1,
        revealed_fraction: 0.0,
    };
    let mut generator = TestBoardGenerator::with_seed(config, 99);

    for board in generator.generate_batch(50) {
        let options = AgentOptions {
            strategy: Strategy::Improved,
            use_global_clue: true,
            use_next_cell_heuristic: true,
            ..AgentOptions::default()
        };
        let mut agent = Agent::with_board(board, options);

        let score = agent.run().expect("run must not hit an inconsistency");
        assert!(agent.board().is_complete());
        assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn test_strategies_agree_on_soundness_across_densities() {
    for (seed, density) in [(1u64, 0.05), (2, 0.2), (3, 0.35)] {
        let config = TestBoardConfig {
            dim: 12,
            mine_density: density,
            revealed_fraction: 0.4,
        };
        let mut generator = TestBoardGenerator::with_seed(config, seed);

        for board in generator.generate_batch(200) {
            assert!(validate_strategy(Strategy::Basic, &board));
            assert!(validate_strategy(Strategy::Improved, &board));
        }
    }
}
