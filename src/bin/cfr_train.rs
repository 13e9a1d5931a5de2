//! `cfr-train` — CFR+ self-play over a game file, writing player 1's
//! average policy.
//!
//! Usage:
//!   cfr-train --game PATH --out-policy PATH [--iters N=50000]

use std::env;
use std::process::ExitCode;

use sequence_form_cfr::cfr::{CFRConfig, SelfPlayDriver};
use sequence_form_cfr::{extract_policy, game_file, policy};

fn print_help() {
    eprintln!("Usage: cfr-train --game PATH --out-policy PATH [--iters N=50000]");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut game_path: Option<String> = None;
    let mut out_policy_path: Option<String> = None;
    let mut iters: u64 = 50_000;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--game" => {
                i += 1;
                if i < args.len() {
                    game_path = Some(args[i].clone());
                }
            }
            "--out-policy" => {
                i += 1;
                if i < args.len() {
                    out_policy_path = Some(args[i].clone());
                }
            }
            "--iters" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse() {
                        Ok(n) => iters = n,
                        Err(_) => {
                            eprintln!("cfr-train: --iters must be a positive integer");
                            return ExitCode::FAILURE;
                        }
                    }
                }
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("cfr-train: unknown argument {:?}", other);
                print_help();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let (Some(game_path), Some(out_policy_path)) = (game_path, out_policy_path) else {
        eprintln!("cfr-train: --game and --out-policy are required");
        print_help();
        return ExitCode::FAILURE;
    };

    let loaded = match game_file::load_file(&game_path) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("cfr-train: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Loaded game: {} P1 sequences, {} P2 sequences, {} payoff entries",
        loaded.treeplex_pl1.num_sequences(),
        loaded.treeplex_pl2.num_sequences(),
        loaded.payoff.len(),
    );

    let config = CFRConfig::default();
    let mut driver = SelfPlayDriver::new(&loaded.treeplex_pl1, &loaded.treeplex_pl2, &loaded.payoff, &config);
    let stats = driver.train(iters);
    println!(
        "done: {} iterations in {:.2}s ({:.0} it/s), final gap = {:.6}",
        stats.iterations,
        stats.elapsed_seconds,
        stats.iterations_per_second,
        stats.exploitability.unwrap_or(f64::NAN),
    );

    let (avg1, _avg2) = driver.average_strategies();
    let p1_policy = extract_policy(&loaded.treeplex_pl1, &avg1);
    if let Err(e) = policy::save(&p1_policy, &out_policy_path) {
        eprintln!("cfr-train: {}", e);
        return ExitCode::FAILURE;
    }
    println!("wrote {}", out_policy_path);

    ExitCode::SUCCESS
}
