pub mod bracket;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod report;
pub mod services;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::Cli;

use crate::cli::Command;
use crate::config::{AppConfig, LeagueSettings};
use crate::domain::League;
use crate::rating::RankContext;
use crate::services::simulation::SimulationService;
use crate::services::tournaments;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_simulate(players: usize, seed: u64, json: bool) -> Result<()> {
    let mut config = AppConfig::new();
    config.simulation.player_count = players;
    config.simulation.seed = seed;

    let service = SimulationService::new(config);
    let league = service.run()?;

    if json {
        let table = domain::standings::standings(league.players());
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    report::print_standings(&league);
    if let Some(tournament) = league.tournaments().last() {
        println!();
        report::print_bracket(&league, tournament);
        if let Some(champion) = tournament.champion() {
            println!("\nChampion: {}", league.player(champion)?.name);
        }
    }
    Ok(())
}

pub fn handle_bracket(entrants: usize) -> Result<()> {
    let mut league = League::new(LeagueSettings::default());
    let mut ids = Vec::with_capacity(entrants);
    for seed in 1..=entrants {
        ids.push(league.register_player(&format!("Seed {seed}"))?);
    }

    // Everyone starts at the same rating, and seeding is stable, so the
    // labels line up with the draw.
    let organizer = *ids
        .first()
        .ok_or_else(|| anyhow::anyhow!("at least 2 entrants are required"))?;
    let tournament_id = tournaments::create_tournament(
        &mut league,
        "Bracket preview",
        None,
        Some(entrants),
        organizer,
    )?;
    tournaments::open_registration(&mut league, tournament_id, organizer)?;
    for id in &ids[1..] {
        tournaments::join_tournament(&mut league, tournament_id, *id)?;
    }
    tournaments::start_tournament(&mut league, tournament_id, organizer)?;

    report::print_bracket(&league, league.tournament(tournament_id)?);
    Ok(())
}

pub fn handle_rate(
    winner: i32,
    loser: i32,
    winner_rank: Option<usize>,
    loser_rank: Option<usize>,
    total_players: Option<usize>,
) -> Result<()> {
    let ranks = match (winner_rank, loser_rank, total_players) {
        (Some(winner_rank), Some(loser_rank), Some(total_players)) => Some(RankContext {
            winner_rank,
            loser_rank,
            total_players,
        }),
        (None, None, None) => None,
        _ => anyhow::bail!(
            "provide all of --winner-rank, --loser-rank and --total-players, or none"
        ),
    };

    let update = rating::apply_result(winner, loser, ranks);
    report::print_exchange(winner, loser, &update);
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
