//! `mccfr-train` — outcome-sampling MCCFR+ over the generative Liar's Dice,
//! writing the combined P1/P2 policy table.
//!
//! Usage:
//!   mccfr-train --out-policy PATH [--iters N=500000]

use std::env;
use std::process::ExitCode;

use sequence_form_cfr::mccfr::{DiceGameConfig, McCfrPlusTrainer};
use sequence_form_cfr::policy;

fn print_help() {
    eprintln!("Usage: mccfr-train --out-policy PATH [--iters N=500000] [--num-dice N=5] [--faces N=6] [--seed N]");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut out_policy_path: Option<String> = None;
    let mut iters: u64 = 500_000;
    let mut num_dice: usize = 5;
    let mut faces: u32 = 6;
    let mut seed: u64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
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
                            eprintln!("mccfr-train: --iters must be a positive integer");
                            return ExitCode::FAILURE;
                        }
                    }
                }
            }
            "--num-dice" => {
                i += 1;
                if i < args.len() {
                    num_dice = args[i].parse().unwrap_or(num_dice);
                }
            }
            "--faces" => {
                i += 1;
                if i < args.len() {
                    faces = args[i].parse().unwrap_or(faces);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or(0);
                }
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("mccfr-train: unknown argument {:?}", other);
                print_help();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let Some(out_policy_path) = out_policy_path else {
        eprintln!("mccfr-train: --out-policy is required");
        print_help();
        return ExitCode::FAILURE;
    };

    let config = DiceGameConfig { num_dice, faces };
    println!("Training MCCFR+ on {} dice, {} faces, seed {}", num_dice, faces, seed);
    let mut trainer = McCfrPlusTrainer::new(config, seed);
    if let Err(e) = trainer.train(iters) {
        eprintln!("mccfr-train: {}", e);
        return ExitCode::FAILURE;
    }

    let table = trainer.extract_policy();
    if let Err(e) = policy::save(&table, &out_policy_path) {
        eprintln!("mccfr-train: {}", e);
        return ExitCode::FAILURE;
    }
    println!("wrote {} ({} information states)", out_policy_path, table.len());

    ExitCode::SUCCESS
}
