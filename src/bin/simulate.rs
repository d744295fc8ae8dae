//! Fishing balance simulator CLI.
//!
//! Plays Monte Carlo fishing sessions to analyze catch odds and prices.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # Default: 1000 sessions, Basic Rod
//!   cargo run --bin simulate -- -n 100 --rod master # 100 sessions with the Master Rod
//!   cargo run --bin simulate -- --seed 42           # Reproducible run

use castline::economy::Rod;
use castline::fishing::QualityPolicy;
use castline::session::GameRules;
use castline::simulator::{run_simulation, SimConfig};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (config, policy, rules_path) = parse_args(&args);

    let mut rules = match rules_path {
        Some(path) => match GameRules::from_json_file(&path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Could not load rules from {}: {}", path, e);
                process::exit(1);
            }
        },
        None => GameRules::default(),
    };
    if let Some(policy) = policy {
        rules.quality_policy = policy;
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CASTLINE BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Sessions:       {}", config.num_runs);
    println!("  Skill:          {:.2}", config.skill);
    println!("  Rod:            {}", config.rod.name());
    println!("  Quality Policy: {}", rules.quality_policy.name());
    if config.enhanced_mode {
        println!("  Enhanced mode:  on");
    }
    if config.price_bonus {
        println!("  Price bonus:    on");
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config, &rules);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<QualityPolicy>, Option<String>) {
    let mut config = SimConfig::default();
    let mut policy = None;
    let mut rules_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-k" | "--skill" => {
                if i + 1 < args.len() {
                    config.skill = args[i + 1].parse().unwrap_or(0.75);
                    i += 1;
                }
            }
            "-r" | "--rod" => {
                if i + 1 < args.len() {
                    match Rod::from_name(&args[i + 1]) {
                        Some(rod) => config.rod = rod,
                        None => eprintln!("Unknown rod {:?}, keeping {}", args[i + 1], config.rod.name()),
                    }
                    i += 1;
                }
            }
            "-p" | "--policy" => {
                if i + 1 < args.len() {
                    policy = QualityPolicy::from_name(&args[i + 1]);
                    if policy.is_none() {
                        eprintln!("Unknown policy {:?}, using the rules file's", args[i + 1]);
                    }
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    rules_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(60 * 120);
                    i += 1;
                }
            }
            "--enhanced" => {
                config.enhanced_mode = true;
            }
            "--price-bonus" => {
                config.price_bonus = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "--quick" => {
                config = SimConfig::rod_check(config.rod).keeping_options_of(&config);
            }
            "--drops" => {
                config = SimConfig::drop_table_check(10_000).keeping_options_of(&config);
            }
            _ => {}
        }
        i += 1;
    }

    (config, policy, rules_path)
}

fn print_help() {
    println!("Castline Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of sessions (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -k, --skill <K>     Autopilot skill 0.0-1.0 (default: 0.75)");
    println!("    -r, --rod <ROD>     basic, novice or master (default: basic)");
    println!("    -p, --policy <P>    Quality policy: simple or weighted");
    println!("    -c, --config <F>    Load rules from a JSON file");
    println!("    -t, --ticks <T>     Max ticks per session (default: 7200)");
    println!("    --enhanced          Use the enhanced probability table");
    println!("    --price-bonus       Multiply sale prices by ten");
    println!("    -v, --verbose       Print every catch");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick check (200 sessions)");
    println!("    --drops             Drop table check (10,000 perfect sessions)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                          # Default run");
    println!("    cargo run --bin simulate -- -n 100 --rod master   # 100 sessions, Master Rod");
    println!("    cargo run --bin simulate -- --seed 42             # Reproducible");
    println!("    cargo run --bin simulate -- --policy simple       # Compare quality policies");
}
