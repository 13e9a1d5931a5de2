//! `solve` — diagnostic runners against a loaded game file.
//!
//! Usage:
//!   solve --game PATH --problem {3.1|3.2|3.3}
//!
//! - 3.1: best-response value of player 1 against player 2's uniform
//!   strategy (and vice versa).
//! - 3.2: exploitability gap of vanilla CFR's averaged strategies after
//!   1000 iterations.
//! - 3.3: exploitability gap of CFR+'s averaged strategies after 5000
//!   iterations.

use std::env;
use std::process::ExitCode;

use sequence_form_cfr::cfr::{CFRConfig, SelfPlayDriver};
use sequence_form_cfr::game_file;
use sequence_form_cfr::sequence_form::{best_response_value, SequenceFormStrategy};

fn print_help() {
    eprintln!("Usage: solve --game PATH --problem {{3.1|3.2|3.3}}");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut game_path: Option<String> = None;
    let mut problem: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--game" => {
                i += 1;
                if i < args.len() {
                    game_path = Some(args[i].clone());
                }
            }
            "--problem" => {
                i += 1;
                if i < args.len() {
                    problem = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("solve: unknown argument {:?}", other);
                print_help();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let (Some(game_path), Some(problem)) = (game_path, problem) else {
        eprintln!("solve: --game and --problem are required");
        print_help();
        return ExitCode::FAILURE;
    };

    let loaded = match game_file::load_file(&game_path) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("solve: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match problem.as_str() {
        "3.1" => {
            let uniform1 = SequenceFormStrategy::uniform(&loaded.treeplex_pl1);
            let uniform2 = SequenceFormStrategy::uniform(&loaded.treeplex_pl2);
            let u1 = loaded.payoff.utility_vector_pl1(loaded.treeplex_pl1.num_sequences(), &uniform2);
            let u2 = loaded.payoff.utility_vector_pl2(loaded.treeplex_pl2.num_sequences(), &uniform1);
            let br1 = match best_response_value(&loaded.treeplex_pl1, &u1) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("solve: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let br2 = match best_response_value(&loaded.treeplex_pl2, &u2) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("solve: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            println!("best_response_value_pl1_vs_uniform = {:.6}", br1);
            println!("best_response_value_pl2_vs_uniform = {:.6}", br2);
        }
        "3.2" => {
            let config = CFRConfig::vanilla();
            let mut driver = SelfPlayDriver::new(&loaded.treeplex_pl1, &loaded.treeplex_pl2, &loaded.payoff, &config);
            for _ in 0..1000 {
                driver.run_iteration();
            }
            match driver.exploitability() {
                Ok(gap) => println!("cfr_exploitability_after_1000_iters = {:.6}", gap),
                Err(e) => {
                    eprintln!("solve: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        "3.3" => {
            let config = CFRConfig::default();
            let mut driver = SelfPlayDriver::new(&loaded.treeplex_pl1, &loaded.treeplex_pl2, &loaded.payoff, &config);
            for _ in 0..5000 {
                driver.run_iteration();
            }
            match driver.exploitability() {
                Ok(gap) => println!("cfr_plus_exploitability_after_5000_iters = {:.6}", gap),
                Err(e) => {
                    eprintln!("solve: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        other => {
            eprintln!("solve: unknown --problem {:?} (expected 3.1, 3.2, or 3.3)", other);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
