use colored::{ColoredString, Colorize};

use crate::domain::models::{PlayerId, Tournament};
use crate::domain::tiers::Tier;
use crate::domain::{standings, League};
use crate::rating::RatingUpdate;

// Pad before colouring; the escape codes would throw off column widths.
fn tier_label(tier: Tier) -> ColoredString {
    let label = format!("{:10}", tier.as_str());
    match tier {
        Tier::Diamond => label.bright_cyan(),
        Tier::Platinum => label.cyan(),
        Tier::Gold => label.yellow(),
        Tier::Silver => label.bright_white(),
        Tier::Bronze => label.magenta(),
        Tier::Plumavit => label.dimmed(),
    }
}

pub fn print_standings(league: &League) {
    println!(
        "{}",
        format!(
            "|{0:>4} | {1:20} | {2:>6} | {3:10} | {4:>7} | {5:>5}",
            "Rank", "Player", "Rating", "Tier", "W-L", "Win%"
        )
        .bold()
    );
    for entry in standings::standings(league.players()) {
        let games = entry.wins + entry.losses;
        let win_pct = if games == 0 {
            0.0
        } else {
            entry.wins as f64 * 100.0 / games as f64
        };
        println!(
            "|{0:>4} | {1:20} | {2:>6} | {3} | {4:>7} | {5:>4.0}%",
            entry.rank,
            entry.name,
            entry.rating,
            tier_label(entry.tier),
            format!("{}-{}", entry.wins, entry.losses),
            win_pct,
        );
    }
}

fn round_label(round: u32, rounds: u32) -> String {
    match rounds - round {
        0 => "Final".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        _ => format!("Round {}", round),
    }
}

fn player_name(league: &League, player: Option<PlayerId>, round: u32) -> ColoredString {
    match player {
        Some(id) => match league.player(id) {
            Ok(p) => p.name.normal(),
            Err(_) => "?".normal(),
        },
        None if round == 1 => "(bye)".dimmed(),
        None => "(tbd)".dimmed(),
    }
}

pub fn print_bracket(league: &League, tournament: &Tournament) {
    println!("{}", tournament.name.bold());
    let rounds = tournament.rounds();
    for round in 1..=rounds {
        println!("  {}", round_label(round, rounds).underline());
        for slot in tournament.bracket.iter().filter(|s| s.round == round) {
            let line = format!(
                "    {:2}. {} vs {}",
                slot.position,
                player_name(league, slot.player1, round),
                player_name(league, slot.player2, round),
            );
            match slot.winner.and_then(|id| league.player(id).ok()) {
                Some(winner) => println!("{}  → {}", line, winner.name.green()),
                None => println!("{}", line),
            }
        }
    }
}

// A loser lifted to the floor comes out ahead, so the sign is computed
// from the actual movement; widened so any i32 span fits.
fn signed_delta(before: i32, after: i32) -> String {
    format!("{:+}", after as i64 - before as i64)
}

pub fn print_exchange(winner_rating: i32, loser_rating: i32, update: &RatingUpdate) {
    println!(
        "Winner: {} → {}  ({})",
        winner_rating,
        update.new_winner_rating,
        signed_delta(winner_rating, update.new_winner_rating).green()
    );
    println!(
        "Loser:  {} → {}  ({})",
        loser_rating,
        update.new_loser_rating,
        signed_delta(loser_rating, update.new_loser_rating).red()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_delta_shows_rises_and_falls() {
        assert_eq!(signed_delta(1200, 1216), "+16");
        assert_eq!(signed_delta(1200, 1184), "-16");
    }

    #[test]
    fn test_floor_lifted_loser_shows_a_gain() {
        assert_eq!(signed_delta(50, 100), "+50");
        assert_eq!(signed_delta(i32::MIN, 100), "+2147483748");
    }
}
