// ABOUTME: Command-line interface for the rollexpr dice roller.
// ABOUTME: Joins its arguments into one expression and prints formula, rolls, and result.

use clap::Parser;
use rollexpr::{FastRng, RollOutcome, Scalar, Value};
use serde_json::{json, Value as Json};
use tracing::Level;

#[derive(Parser)]
#[command(name = "roll")]
#[command(about = "Roll dice expressions like \"2d6 + 4\" and show every die")]
#[command(version)]
struct Cli {
    /// Dice expression (e.g., "2d6 + 4", "d20, d20"); arguments are joined.
    /// Options must come before the expression.
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    expression: Vec<String>,

    /// Seed the random number generator for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    let input = cli.expression.concat();
    let mut rng = match cli.seed {
        Some(seed) => FastRng::with_seed(seed),
        None => FastRng::new(),
    };

    match rollexpr::roll_with_rng(&input, &mut rng) {
        Ok(outcome) => {
            if cli.json {
                print_json(&outcome);
            } else {
                println!("{}", outcome);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn scalar_json(s: &Scalar) -> Json {
    match *s {
        Scalar::Int(n) => json!(n),
        Scalar::Real(x) => json!(x),
    }
}

/// Build the JSON report; `result` is a number, or an array for lists.
fn outcome_json(outcome: &RollOutcome) -> Json {
    let result = match &outcome.value {
        Value::Scalar(s) => scalar_json(s),
        Value::List(items) => Json::Array(items.iter().map(scalar_json).collect()),
    };

    json!({
        "expression": outcome.expression,
        "rolls": outcome.rolls,
        "result": result,
    })
}

fn print_json(outcome: &RollOutcome) {
    match serde_json::to_string_pretty(&outcome_json(outcome)) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
