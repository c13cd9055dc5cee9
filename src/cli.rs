use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "club ladder rating and tournament engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Play out a simulated season and print the final standings
    Simulate {
        /// Number of players in the league (2-16)
        #[arg(short, long, default_value_t = 8)]
        players: usize,

        /// Seed for the season's random results
        #[arg(short, long, default_value_t = 7)]
        seed: u64,

        /// Print the standings as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how a bracket of the given size pairs up
    Bracket {
        /// Number of entrants
        #[arg(short, long, default_value_t = 8)]
        entrants: usize,
    },
    /// Compute the rating exchange for a single result
    Rate {
        /// Winner's current rating
        winner: i32,

        /// Loser's current rating
        loser: i32,

        /// Winner's position on the ladder (with --loser-rank and --total-players)
        #[arg(long)]
        winner_rank: Option<usize>,

        /// Loser's position on the ladder
        #[arg(long)]
        loser_rank: Option<usize>,

        /// Number of players on the ladder
        #[arg(long)]
        total_players: Option<usize>,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
