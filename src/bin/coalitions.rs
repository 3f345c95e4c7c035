//! Coalition Values Binary
//!
//! Computes Shapley and Banzhaf values for games described on the command line.

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use coalitions::*;
use colored::Colorize;
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Raise log verbosity")]
    verbose: u8,
    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Exact Shapley values over every distinct ordering", alias = "sh")]
    Shapley {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Monte-Carlo Shapley values from shuffled orderings", alias = "mc")]
    Simulate {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, default_value_t = MONTE_CARLO_TRIALS)]
        trials: usize,
        #[arg(long, default_value_t = MONTE_CARLO_SEED)]
        seed: u64,
        #[arg(long, help = "Seed from the thread RNG instead of --seed")]
        entropy: bool,
    },
    #[command(about = "Exact Banzhaf values of a simple game", alias = "bz")]
    Banzhaf {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "Zero-normalize a game and print its table", alias = "norm")]
    Normalize {
        #[command(flatten)]
        game: GameArgs,
    },
    #[command(about = "List the distinct orderings of a population", alias = "perm")]
    Permutations {
        #[arg(long, required = true, help = "Population such as A:3,B:2")]
        types: String,
        #[arg(long, help = "Stop after this many orderings")]
        limit: Option<usize>,
    },
}

/// one of several ways to describe a game
#[derive(Args)]
struct GameArgs {
    #[arg(long, help = "Population such as A:3,B:2")]
    types: Option<String>,
    #[arg(long, help = "Voting strengths such as A:1,B:2 (needs --quota)")]
    strengths: Option<String>,
    #[arg(long, help = "Winning quota for --strengths")]
    quota: Option<Utility>,
    #[arg(long, help = "Grouped values such as \"A:1,B:1=1; A:2=1\"")]
    vals: Option<String>,
    #[arg(long, help = "Ungrouped values such as \"0,1=1; 0,2=1\"")]
    ungrouped: Option<String>,
    #[arg(long, help = "Preset: glove, glove-ungrouped, majority, council-1945, council-1965")]
    scenario: Option<String>,
}

impl GameArgs {
    fn population(&self) -> anyhow::Result<Option<Population<String>>> {
        self.types
            .as_deref()
            .map(Population::<String>::try_from)
            .transpose()
    }

    fn game(&self) -> anyhow::Result<CoalitionalGame<String>> {
        if let Some(scenario) = self.scenario.as_deref() {
            return Scenario::try_from(scenario)?.game(self.population()?);
        }
        if let Some(ungrouped) = self.ungrouped.as_deref() {
            let (population, table) = Table::parse_ungrouped(ungrouped)?;
            return CoalitionalGame::new(population, table);
        }
        let population = self
            .population()?
            .ok_or_else(|| anyhow::anyhow!("describe a game with --types, --ungrouped or --scenario"))?;
        match (self.strengths.as_deref(), self.quota, self.vals.as_deref()) {
            (Some(_), _, Some(_)) => anyhow::bail!("--strengths and --vals are exclusive"),
            (Some(strengths), Some(quota), None) => {
                let voting = Voting::try_from((strengths, quota))?;
                CoalitionalGame::new(population, voting)
            }
            (Some(_), None, None) => anyhow::bail!("--strengths needs a --quota"),
            (None, _, Some(vals)) => {
                let table = Table::parse_grouped(vals, &population)?;
                CoalitionalGame::new(population, table)
            }
            (None, _, None) => majority(population),
        }
    }
}

fn report(
    title: &str,
    game: &CoalitionalGame<String>,
    allocation: &Allocation<String>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(allocation)?);
        return Ok(());
    }
    println!("{} {}", title.bold(), game.population().to_string().dimmed());
    print!("{}", allocation);
    let total = allocation.total(game.population());
    let grand = game.grand()?;
    let line = format!("{:<12}{:>12.6}", "total", total);
    if (total - grand).abs() < 1e-6 {
        println!("{}", line.green());
    } else {
        println!("{} (grand coalition {:.6})", line.yellow(), grand);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    coalitions::logging(match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    });
    match cli.command {
        Command::Shapley { game } => {
            let game = game.game()?;
            report("shapley", &game, &game.shapley()?, cli.json)
        }
        Command::Simulate {
            game,
            trials,
            seed,
            entropy,
        } => {
            let game = game.game()?;
            let values = match entropy {
                true => Shapley::simulate(&game, trials)?,
                false => Shapley::simulate_seeded(&game, trials, seed)?,
            };
            report("simulated shapley", &game, &values, cli.json)
        }
        Command::Banzhaf { game } => {
            let game = game.game()?;
            report("banzhaf", &game, &game.banzhaf()?, cli.json)
        }
        Command::Normalize { game } => {
            let (normal, sign) = game.game()?.zero_normalize()?;
            let table = normal
                .table()?
                .into_inner()
                .into_iter()
                .collect::<BTreeMap<_, _>>();
            if cli.json {
                let table = table
                    .iter()
                    .map(|(c, v)| (c.to_string(), *v))
                    .collect::<BTreeMap<_, _>>();
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!("{} grand coalition {}", "normalized".bold(), sign);
                for (coalition, value) in table.iter() {
                    println!("{:<24}{:>12.6}", coalition.to_string(), value);
                }
            }
            Ok(())
        }
        Command::Permutations { types, limit } => {
            let population = Population::<String>::try_from(types.as_str())?;
            let orderings = DistinctPermutations::from(&population)
                .take(limit.unwrap_or(usize::MAX))
                .map(|ordering| ordering.join(" "))
                .collect::<Vec<_>>();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&orderings)?);
            } else {
                let total = population
                    .orderings()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "too many".to_string());
                println!("{} {} of {}", "orderings".bold(), orderings.len(), total);
                for ordering in orderings {
                    println!("{}", ordering);
                }
            }
            Ok(())
        }
    }
}
