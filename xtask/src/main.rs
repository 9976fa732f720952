use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride quote workspace",
    long_about = "A unified CLI for generating data, training and evaluating the ETA model,\n\
                  serving quotes, benchmarks, and CI checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the synthetic ride dataset
    Generate {
        #[arg(long, default_value_t = 10_000)]
        samples: usize,
        /// Fixed seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Train the ETA model from the dataset
    Train {
        #[arg(long, default_value_t = 250)]
        trees: usize,
    },
    /// Evaluate the trained model and export plot data
    Evaluate,
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "QUOTE_BIND", default_value = "127.0.0.1:8001")]
        bind: String,
    },
    /// Print a one-off ranked quote in the terminal
    Console {
        #[arg(long, default_value_t = 18)]
        hour: u8,
        #[arg(long, default_value = "balanced")]
        preference: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, pipeline, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Generate, train, evaluate and quote end to end on a small dataset
    Pipeline,
    /// Run benchmarks
    Bench,
    /// Run check + pipeline + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_bin(package: &str, bin: &str, release: bool, bin_args: &[&str]) {
    let mut args = vec!["run", "-p", package, "--bin", bin];
    if release {
        args.push("--release");
    }
    args.push("--");
    args.extend_from_slice(bin_args);
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    for package in ["quote_core", "quote_training", "quote_server"] {
        step(&format!("Test {package}"));
        run_cargo(&["test", "-p", package]);
    }
}

fn ci_pipeline() {
    let dir = "target/ci-pipeline";
    let data = format!("{dir}/rides_dataset.csv");
    let models = format!("{dir}/artifacts");
    let evaluation = format!("{dir}/evaluation");

    step("Generate 2 000 rides (seed 42)");
    run_bin(
        "quote_training",
        "generate_data",
        true,
        &["--samples", "2000", "--seed", "42", "--out", &data],
    );

    step("Train a 40-tree forest");
    run_bin(
        "quote_training",
        "train_model",
        true,
        &["--data", &data, "--out-dir", &models, "--trees", "40", "--quiet"],
    );

    step("Evaluate");
    run_bin(
        "quote_training",
        "evaluate_model",
        true,
        &["--data", &data, "--model-dir", &models, "--out-dir", &evaluation],
    );

    step("Console quote");
    run_bin(
        "quote_server",
        "quote_server",
        true,
        &["--model-dir", &models, "console", "--hour", "18"],
    );
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "quote_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { samples, seed } => {
            let samples = samples.to_string();
            let seed = seed.map(|s| s.to_string());
            let mut args = vec!["--samples", samples.as_str()];
            if let Some(seed) = seed.as_deref() {
                args.extend(["--seed", seed]);
            }
            run_bin("quote_training", "generate_data", false, &args);
        }
        Commands::Train { trees } => {
            let trees = trees.to_string();
            run_bin("quote_training", "train_model", true, &["--trees", &trees]);
        }
        Commands::Evaluate => {
            run_bin("quote_training", "evaluate_model", true, &[]);
        }
        Commands::Serve { bind } => {
            run_bin("quote_server", "quote_server", true, &["serve", "--bind", &bind]);
        }
        Commands::Console { hour, preference } => {
            let hour = hour.to_string();
            run_bin(
                "quote_server",
                "quote_server",
                false,
                &["console", "--hour", &hour, "--preference", &preference],
            );
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "quote_core", "--bench", "performance"]);
        }
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_cargo(&[
                "bench",
                "--package",
                "quote_core",
                "--bench",
                "performance",
                "--",
                "--save-baseline",
                "main",
            ]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_cargo(&[
                "bench",
                "--package",
                "quote_core",
                "--bench",
                "performance",
                "--",
                "--baseline",
                "main",
            ]);
        }
        Commands::Ci { job } => match job {
            CiJob::Check => ci_check(),
            CiJob::Pipeline => ci_pipeline(),
            CiJob::Bench => ci_bench(),
            CiJob::All => {
                ci_check();
                ci_pipeline();
                ci_bench();
            }
        },
    }
}
