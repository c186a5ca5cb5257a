// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{io::Write, path::PathBuf};

use clap::{self, CommandFactory, Parser};
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use tournament_kit::{
    COPYRIGHT, LONG_VERSION, Named, Participation, RoundRobinGenerator, Team, Tournament,
    generator::first_duplicate, match_type::NamedMatchType, rules::RuleSet, utils,
};

const DEFAULT_RULES: &str = r#"(
    match_types: {
        "regular": (
            scoring: (winning_method: HighestScore, ranked_rewards: [2]),
        ),
        "decider": (
            scoring: (winning_method: HighestScore, ranked_rewards: [1]),
            decider: true,
        ),
    },
)"#;

/// Round Robin
///
/// Prints a schedule where every participant meets every other participant
/// exactly once.
#[derive(Parser, Debug)]
#[command(version, long_version = LONG_VERSION, about)]
struct Args {
    /// The names of the participants
    #[arg(required_unless_present = "man", num_args = 2.., value_name = "name")]
    participants: Vec<String>,

    /// A RON file with the match types
    #[arg(long, value_name = "path")]
    rules: Option<PathBuf>,

    /// The match type every match is played as
    #[arg(default_value = "regular", long)]
    match_type: String,

    /// Group consecutive participants into teams of this size
    #[arg(long, value_name = "size")]
    team_size: Option<usize>,

    /// Seed the random order of matches and sides
    #[arg(long)]
    seed: Option<u64>,

    /// Log on the debug level
    #[arg(long)]
    verbose: bool,

    /// Build the manpage
    #[arg(long)]
    man: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.man {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Args::command().name("round-robin").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-19");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("round-robin.1", buffer)?;
        return Ok(());
    }

    utils::init_logger(args.verbose);

    let rules: RuleSet<i64> = if let Some(path) = &args.rules {
        debug!("reading the rules from {}", path.display());
        RuleSet::from_path(path)?
    } else {
        RuleSet::from_ron_str(DEFAULT_RULES)?
    };

    let match_type = rules.match_type(&args.match_type)?;
    let decider = rules.decider().ok();
    let players: Vec<Named> = args
        .participants
        .iter()
        .map(|name| Named::from(name.as_str()))
        .collect();

    if let Some(duplicate) = first_duplicate(&players) {
        return Err(anyhow::Error::msg(format!(
            "{duplicate} is named more than once"
        )));
    }

    match args.team_size {
        None | Some(1) => print_schedule(&players, match_type, decider, args.seed),
        Some(0) => Err(anyhow::Error::msg("the team size has to be at least 1")),
        Some(size) => {
            if !players.len().is_multiple_of(size) {
                return Err(anyhow::Error::msg(format!(
                    "{} participants can't be split into teams of {size}",
                    players.len()
                )));
            }

            let teams: Vec<_> = players
                .chunks(size)
                .map(|chunk| Team::new(chunk.to_vec()))
                .collect();
            print_schedule(&teams, match_type, decider, args.seed)
        }
    }
}

fn print_schedule<P: Participation>(
    participations: &[P],
    match_type: NamedMatchType<i64>,
    decider: Option<NamedMatchType<i64>>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if participations.len() < 2 {
        return Err(anyhow::Error::msg("at least 2 participations are required"));
    }

    info!(
        "{} participations, {} with {}",
        participations.len(),
        match_type,
        match_type.scoring.winning_method()
    );

    let generator = RoundRobinGenerator::new(match_type);
    let schedule = if let Some(seed) = seed {
        generator.generate_with_rng(participations, &mut StdRng::seed_from_u64(seed))
    } else {
        generator.generate_with_rng(participations, &mut rand::rng())
    };

    print!("{schedule}");

    if let Some(decider) = decider {
        let tournament = schedule.into_tournament(decider);
        debug!(
            "{} match days, {} matches, ties between the leaders are settled by {}",
            tournament.match_days().len(),
            tournament.matches().count(),
            tournament.decider_type()
        );
    }

    Ok(())
}
