//! Command-line front end: play sessions, generate strength data, tally
//! session reports.

use std::{env, path::PathBuf, str::FromStr, sync::Arc};

use anyhow::{Context, Error, bail};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use turing_holdem::{
    Orchestrator, Player, Reporter, Table, TableSettings,
    datagen::{ChenStrength, Generator},
    decision::{ChatPolicy, LmConfig, Policy, PolicyProgram, RangePolicy},
    personality::{Personality, random_name},
    report::Tally,
};

const HELP: &str = "\
Run and analyse Turing Hold'em sessions

USAGE:
  th_cli <COMMAND> [OPTIONS]

COMMANDS:
  play                     Play hands between the six preset personalities
  generate                 Sample hand strengths for every preset personality
  tally                    Count winners across saved session reports

PLAY OPTIONS:
  --hands      N           Hands to play                 [default: env TH_HANDS or 100]
  --reports    DIR         Report directory              [default: env TH_REPORTS_DIR or reports]
  --programs   DIR         Policy programs, <name>.json  [default: env TH_PROGRAMS_DIR, unset plays ranges]
  --seed       S           Seed for reproducible deals

GENERATE OPTIONS:
  --out          DIR       Output directory              [default: data]
  --simulations  N         Simulations per personality   [default: 1024]
  --seed         S         Base seed                     [default: 0]

TALLY OPTIONS:
  --reports    DIR         Report directory              [default: env TH_REPORTS_DIR or reports]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TH_LM_API_BASE           Chat completions base URL     [default: http://localhost:8000/v1]
  TH_LM_MODEL              Model name                    [default: meta-llama/Llama-3.1-8B-Instruct]
  TH_LM_API_KEY            API key                       [default: NONE]
";

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn lm_config() -> LmConfig {
    let defaults = LmConfig::default();
    LmConfig {
        api_base: env::var("TH_LM_API_BASE").unwrap_or(defaults.api_base),
        model: env::var("TH_LM_MODEL").unwrap_or(defaults.model),
        api_key: env::var("TH_LM_API_KEY").unwrap_or(defaults.api_key),
        ..defaults
    }
}

fn policy_for(personality: &Arc<Personality>, programs: Option<&PathBuf>) -> Result<Policy, Error> {
    let Some(dir) = programs else {
        return Ok(RangePolicy::chen(Arc::clone(personality)).into());
    };
    let path = dir.join(format!("{}.json", personality.name));
    let program = PolicyProgram::load(&path)?;
    let policy = ChatPolicy::new(lm_config(), program)
        .with_context(|| format!("building chat policy for {}", personality.name))?;
    Ok(policy.into())
}

fn play(mut pargs: Arguments) -> Result<(), Error> {
    let hands: usize = pargs
        .opt_value_from_str("--hands")?
        .unwrap_or_else(|| env_or("TH_HANDS", 100));
    let reports: PathBuf = pargs
        .opt_value_from_str("--reports")?
        .unwrap_or_else(|| env_or("TH_REPORTS_DIR", PathBuf::from("reports")));
    let programs: Option<PathBuf> = pargs
        .opt_value_from_str("--programs")?
        .or_else(|| env::var("TH_PROGRAMS_DIR").ok().map(PathBuf::from));
    let seed: Option<u64> = pargs.opt_value_from_str("--seed")?;

    let mut rng = rand::rng();
    let players = Personality::presets()
        .iter()
        .enumerate()
        .map(|(seat, personality)| {
            let policy = policy_for(personality, programs.as_ref())?;
            Ok(Player::new(random_name(&mut rng), Arc::clone(personality), seat, policy))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    for player in &players {
        info!("Seat {}: {} plays {}", player.seat, player.name, player.personality);
    }

    let settings = TableSettings {
        player_count: players.len(),
        ..TableSettings::default()
    };
    let mut next_seed = seed;
    let new_table = move || match next_seed.as_mut() {
        Some(seed) => {
            let table = Table::seeded(&settings, *seed);
            *seed = seed.wrapping_add(1);
            table
        }
        None => Table::new(&settings),
    };

    let mut orchestrator = Orchestrator::new(players, new_table, Reporter::new(reports))?;
    let path = orchestrator.play(hands)?;
    info!("Played {} hands, report at {}", orchestrator.hands_played(), path.display());

    println!("{}", Tally::from_winners(orchestrator.winners()));
    Ok(())
}

fn generate(mut pargs: Arguments) -> Result<(), Error> {
    let defaults = Generator::default();
    let out: PathBuf = pargs
        .opt_value_from_str("--out")?
        .unwrap_or_else(|| PathBuf::from("data"));
    let generator = Generator {
        simulations: pargs
            .opt_value_from_str("--simulations")?
            .unwrap_or(defaults.simulations),
        seed: pargs.opt_value_from_str("--seed")?.unwrap_or(defaults.seed),
        ..defaults
    };

    for personality in Personality::presets() {
        let data = generator.run(personality, &ChenStrength)?;
        let (data_path, summary_path) = data.write(&out)?;
        info!(
            "Wrote {} and {}",
            data_path.display(),
            summary_path.display()
        );
    }
    Ok(())
}

fn tally(mut pargs: Arguments) -> Result<(), Error> {
    let reports: PathBuf = pargs
        .opt_value_from_str("--reports")?
        .unwrap_or_else(|| env_or("TH_REPORTS_DIR", PathBuf::from("reports")));
    let tally = Tally::from_dir(&reports)
        .with_context(|| format!("reading reports from {}", reports.display()))?;
    println!("{tally}");
    Ok(())
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    match pargs.subcommand()?.as_deref() {
        Some("play") => play(pargs),
        Some("generate") => generate(pargs),
        Some("tally") => tally(pargs),
        Some(other) => bail!("unknown command {other:?}, see --help"),
        None => {
            print!("{HELP}");
            Ok(())
        }
    }
}
