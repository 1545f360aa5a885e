//! Scenario Runner
//!
//! Command-line tool for running the Brisk combobox interaction scenarios.
//!
//! Usage:
//!   brisk-scenarios              # Run all scenarios
//!   brisk-scenarios --filter foo # Run scenarios matching "foo"
//!   brisk-scenarios --list       # List all scenarios
//!   brisk-scenarios --json       # Print a JSON report instead of the summary

use anyhow::Result;
use brisk_test_suite::{runner::TestRunner, tests};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brisk-scenarios")]
#[command(about = "Run the Brisk combobox interaction scenarios", long_about = None)]
struct Args {
    /// List all scenarios and exit
    #[arg(long)]
    list: bool,

    /// Only run scenarios whose name or suite contains this pattern
    #[arg(long)]
    filter: Option<String>,

    /// Print the results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.list {
        println!("Available scenario suites:");
        for suite in tests::all_suites() {
            println!("\n  {}:", suite.name);
            for case in &suite.cases {
                println!("    - {}", case.name);
            }
        }
        return Ok(());
    }

    if !args.json {
        println!("╔══════════════════════════════════════════╗");
        println!("║     BRISK COMBOBOX INTERACTION TESTS     ║");
        println!("╚══════════════════════════════════════════╝\n");
    }

    let mut runner = TestRunner::new();
    for suite in tests::all_suites() {
        runner.add_suite(suite);
    }

    if let Some(ref pattern) = args.filter {
        if !args.json {
            println!("Running scenarios matching: {}\n", pattern);
        }
        runner.filter(pattern);
    }

    let result = runner.run();

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        result.print_summary();
    }

    if result.all_passed() {
        if !args.json {
            println!("\nAll scenarios passed!");
        }
        Ok(())
    } else {
        std::process::exit(1);
    }
}
