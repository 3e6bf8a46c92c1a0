//! CLI for pseudolab: classical pseudorandom generators and their acceptance tests.

mod commands;
mod render;
mod session;

use clap::{Parser, Subcommand};
use commands::{GenerationArgs, TestArgs};

#[derive(Parser)]
#[command(name = "pseudolab")]
#[command(about = "Middle-square, middle-product and constant-multiplier generators with mean, variance and chi-square tests")]
#[command(version = pseudolab_core::VERSION)]
struct Cli {
    /// JSON file with default seeds, count and test parameters
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sequence and print the step-by-step trace
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a sequence and run acceptance tests on it
    Test {
        /// Which test to run
        #[arg(value_parser = ["mean", "variance", "uniformity", "all"])]
        kind: String,

        #[command(flatten)]
        generation: GenerationArgs,

        #[command(flatten)]
        tests: TestArgs,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate, run every test, and optionally export the full report
    Report {
        #[command(flatten)]
        generation: GenerationArgs,

        #[command(flatten)]
        tests: TestArgs,

        /// Write the report to this file
        #[arg(long)]
        export: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = commands::load_config(cli.config.as_deref()).and_then(|config| {
        match &cli.command {
            Commands::Generate { generation, json } => {
                commands::generate::run(generation, &config, *json)
            }
            Commands::Test {
                kind,
                generation,
                tests,
                json,
            } => commands::test::run(kind, generation, tests, &config, *json),
            Commands::Report {
                generation,
                tests,
                export,
            } => commands::report::run(generation, tests, &config, export.as_deref()),
        }
    });

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["pseudolab", "generate"]).unwrap();
        match cli.command {
            Commands::Generate { generation, json } => {
                assert_eq!(generation.method, "middle-square");
                assert_eq!(generation.seed, None);
                assert!(!json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_test_with_flags() {
        let cli = Cli::try_parse_from([
            "pseudolab",
            "test",
            "all",
            "--method",
            "middle-product",
            "--seed",
            "1234",
            "--seed2",
            "5678",
            "-n",
            "20",
            "--confidence",
            "0.9",
            "--exact",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Test {
                kind,
                generation,
                tests,
                ..
            } => {
                assert_eq!(kind, "all");
                assert_eq!(generation.seed2, Some(5678));
                assert_eq!(generation.count, Some(20));
                assert_eq!(tests.confidence, Some(0.9));
                assert!(tests.exact);
            }
            _ => panic!("expected test"),
        }
    }

    #[test]
    fn test_parse_negative_seed_reaches_validation() {
        let cli = Cli::try_parse_from(["pseudolab", "generate", "--seed", "-5"]).unwrap();
        match cli.command {
            Commands::Generate { generation, .. } => assert_eq!(generation.seed, Some(-5)),
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_method() {
        assert!(Cli::try_parse_from(["pseudolab", "generate", "--method", "lcg"]).is_err());
        assert!(Cli::try_parse_from(["pseudolab", "test", "poker"]).is_err());
    }
}
