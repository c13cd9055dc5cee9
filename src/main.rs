use anyhow::Result;

use club_ladder::cli::Command;
use club_ladder::{handle_bracket, handle_completions, handle_rate, handle_simulate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Simulate {
            players,
            seed,
            json,
        } => handle_simulate(*players, *seed, *json),
        Command::Bracket { entrants } => handle_bracket(*entrants),
        Command::Rate {
            winner,
            loser,
            winner_rank,
            loser_rank,
            total_players,
        } => handle_rate(*winner, *loser, *winner_rank, *loser_rank, *total_players),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
