use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use route_logic::condition::{format_condition, parse};
use route_logic::route::{resolve_block, BlockOutcome, BlockProps, RouteLoader};
use route_logic::tracker::{compute_iv_ranges, compute_possible_natures};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a condition against a tracker in a route file
    Eval {
        /// Path to the route state file
        #[arg(short, long)]
        route: PathBuf,

        /// Name of the tracker the condition refers to
        #[arg(short, long)]
        source: String,

        /// The condition to evaluate
        #[arg(short, long)]
        condition: String,

        /// Level the condition applies at
        #[arg(short, long)]
        level: Option<String>,

        /// Evolution stage the condition applies at
        #[arg(short, long, default_value = "0")]
        evolution: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the IV ranges and possible natures of a tracker
    Ranges {
        /// Path to the route state file
        #[arg(short, long)]
        route: PathBuf,

        /// Name of the tracker
        #[arg(short, long)]
        source: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical form of a condition
    Format {
        /// The condition to format
        #[arg(short, long)]
        condition: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Eval {
            route,
            source,
            condition,
            level,
            evolution,
            json,
        } => {
            let state = RouteLoader::new()
                .load_route(&route)
                .with_context(|| format!("Failed to load route {}", route.display()))?;

            let mut props = BlockProps::new(source, condition).at_evolution(evolution);
            props.level = level;

            let outcome = resolve_block(&props, &state);
            log::info!("Outcome: {:?}", outcome);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            match outcome {
                BlockOutcome::Shown { header } if !json => println!("{}", header),
                BlockOutcome::Hidden if !json => println!("Condition not met"),
                BlockOutcome::Error { message } => bail!(message),
                _ => {}
            }
        }
        Commands::Ranges { route, source, json } => {
            let state = RouteLoader::new()
                .load_route(&route)
                .with_context(|| format!("Failed to load route {}", route.display()))?;
            let tracker = state.tracker(&source)?;

            let ranges = compute_iv_ranges(tracker)
                .with_context(|| format!("{} has inconsistent observations", source))?;
            let natures = compute_possible_natures(&ranges, tracker)
                .with_context(|| format!("{} has inconsistent observations", source))?;

            if json {
                let ranges: serde_json::Map<String, serde_json::Value> = ranges
                    .iter()
                    .map(|(stat, range)| (stat.to_string(), json!([range.low, range.high])))
                    .collect();
                let natures: Vec<String> = natures.iter().map(|n| n.to_string()).collect();
                let report = json!({ "source": source, "ranges": ranges, "natures": natures });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", source);
                for (stat, range) in ranges.iter() {
                    println!("  {:<3} {}", stat.name(), range);
                }
                println!("  Natures: {}", natures);
            }
        }
        Commands::Format { condition } => {
            let expr = parse(&condition)
                .with_context(|| format!("{} is not a valid conditional statement", condition))?;
            println!("{}", format_condition(&expr));
        }
    }

    Ok(())
}
