use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pet_battle::battle::ai::{MoveSelector, ScoringAI};
use pet_battle::progression::summarize;
use pet_battle::{
    attempt_flee, create_battler, execute_turn, generate_npc_opponent, initialize_battle,
    BattleData, BattleEvent, BattleState, Difficulty, Species, TurnRng,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  /attack <n>  use your n-th move
  /flee        try to run away
  /hp          show both battlers' HP
  /moves       list your moves and PP
  /help        show this message
  /quit        leave the battle";

#[derive(Parser)]
#[command(version, about = "Fight a wild pet from the terminal")]
struct Cli {
    /// Species of your pet.
    #[arg(default_value = "meep")]
    species: Species,
    /// Level of your pet.
    #[arg(default_value_t = 10)]
    level: u8,
    /// Opponent difficulty: easy, normal or hard.
    #[arg(default_value = "normal")]
    difficulty: Difficulty,
    /// Seed for a reproducible battle.
    #[arg(long)]
    seed: Option<u64>,
    /// Alternate battle data in RON.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Print events as JSON lines instead of narration.
    #[arg(long)]
    json: bool,
    /// Let the built-in AI play your side.
    #[arg(long)]
    auto: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let data = match &cli.data {
        Some(path) => BattleData::load(path)
            .with_context(|| format!("failed to load battle data from {}", path.display()))?,
        None => BattleData::builtin(),
    };
    let mut rng = cli.seed.map_or_else(TurnRng::new_random, TurnRng::from_seed);
    info!(seed = ?rng.seed(), "starting battle");

    let player = create_battler(&data, cli.species, cli.level, true, false, None, None);
    let opponent = generate_npc_opponent(&data, player.level, cli.difficulty, &mut rng);
    let mut state = initialize_battle(player, opponent);
    let mut history = Vec::new();
    record(&state, &mut history, cli.json)?;

    if cli.auto {
        run_auto(&data, &mut state, &mut history, &mut rng, cli.json)?;
    } else {
        println!("{HELP}");
        run_interactive(&data, &mut state, &mut history, &mut rng, cli.json)?;
    }

    let summary = summarize(&state, &history);
    if cli.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!();
        println!("{}", if summary.won { "Victory!" } else { "Battle over." });
        println!("  Opponent: {} (Lv.{})", summary.opponent_name, summary.opponent_level);
        println!("  Turns: {}", summary.turns_played);
        println!("  Damage dealt: {}  taken: {}", summary.damage_dealt, summary.damage_taken);
        println!("  XP: +{}  Coins: +{}", summary.xp_gained, summary.coins_gained);
    }
    Ok(())
}

fn run_interactive(
    data: &BattleData,
    state: &mut BattleState,
    history: &mut Vec<BattleEvent>,
    rng: &mut TurnRng,
    json: bool,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.is_over() {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut words = line.split_whitespace();

        match words.next() {
            Some("/attack") => {
                let chosen = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|slot| state.player.moves.get(slot))
                    .map(|instance| instance.id());
                match chosen {
                    Some(move_) => {
                        *state = execute_turn(data, state, move_, rng);
                        record(state, history, json)?;
                    }
                    None => print_moves(state),
                }
            }
            Some("/flee") => {
                *state = attempt_flee(data, state, rng);
                record(state, history, json)?;
            }
            Some("/hp") => print_hp(state),
            Some("/moves") => print_moves(state),
            Some("/help") => println!("{HELP}"),
            Some("/quit") => break,
            Some(other) => println!("Unknown command {other}. Type /help."),
            None => {}
        }
    }
    Ok(())
}

/// The player's side is driven by the same scoring AI as the opponent.
fn run_auto(
    data: &BattleData,
    state: &mut BattleState,
    history: &mut Vec<BattleEvent>,
    rng: &mut TurnRng,
    json: bool,
) -> Result<()> {
    let selector = ScoringAI::new();
    while !state.is_over() {
        let choice = selector.select_move(data, &state.player, &state.opponent, rng);
        *state = match choice.slot {
            Some(_) => execute_turn(data, state, choice.data.id, rng),
            None if state.can_flee => attempt_flee(data, state, rng),
            None => {
                println!("{} is out of moves.", state.player.name);
                break;
            }
        };
        record(state, history, json)?;
    }
    Ok(())
}

fn record(state: &BattleState, history: &mut Vec<BattleEvent>, json: bool) -> Result<()> {
    for event in &state.events {
        if json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", event.message);
        }
    }
    history.extend(state.events.iter().cloned());
    Ok(())
}

fn print_hp(state: &BattleState) {
    for battler in [&state.player, &state.opponent] {
        println!(
            "{} (Lv.{}): {}/{} HP",
            battler.name, battler.level, battler.stats.hp, battler.stats.max_hp
        );
    }
}

fn print_moves(state: &BattleState) {
    for (i, instance) in state.player.moves.iter().enumerate() {
        println!(
            "  {}. {} ({}) {}/{} PP",
            i + 1,
            instance.data.name,
            instance.data.element,
            instance.current_pp,
            instance.data.max_pp
        );
    }
}
