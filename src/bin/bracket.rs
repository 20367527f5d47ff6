//! Command line bracket runner: builds a tournament from a team CSV and prints it as JSON.
//! Run with: cargo run --bin bracket -- <sport> <format> <teams.csv>
//! The CSV needs a `team` header; rows are paired in file order.
//! Override with env: BRACKET_START (RFC 3339 first match time), BRACKET_SIMULATE=1
//! (play every match with random scores), RUST_LOG.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sports_bracket::logic::rules;
use sports_bracket::{
    Bracket, Format, InMemoryStore, LogNotifier, Podium, Progress, Side, Sport, TeamStats,
    Tournament, TournamentService, PLACEHOLDER,
};
use std::path::Path;

#[derive(Deserialize)]
struct TeamRow {
    team: String,
}

#[derive(Serialize)]
struct Summary {
    tournament: Tournament,
    bracket: Bracket,
    progress: Progress,
    standings: Vec<TeamStats>,
    podium: Podium,
}

fn default_start() -> DateTime<Utc> {
    Utc::now()
}

fn default_simulate() -> bool {
    false
}

fn read_teams(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut teams = Vec::new();
    for row in reader.deserialize() {
        let row: TeamRow = row.with_context(|| format!("reading {}", path.display()))?;
        teams.push(row.team);
    }
    Ok(teams)
}

/// Play every ready match with random scores until nothing is left to play.
fn simulate(
    service: &TournamentService<InMemoryStore, LogNotifier>,
    tournament: &Tournament,
) -> anyhow::Result<()> {
    let (min, max) = rules::score_range(tournament.sport);
    let mut rng = rand::thread_rng();
    loop {
        let bracket = service.bracket(tournament.id)?;
        let Some(next) = bracket
            .matches()
            .find(|m| !m.is_completed() && m.is_ready())
            .cloned()
        else {
            return Ok(());
        };

        let high = rng.gen_range(min + 1..=max);
        let low = rng.gen_range(min..high);
        let winner_side = if rng.gen_bool(0.5) { Side::One } else { Side::Two };
        let (score1, score2) = match winner_side {
            Side::One => (high, low),
            Side::Two => (low, high),
        };
        let winner = next.team(winner_side).to_string();
        if winner == PLACEHOLDER {
            bail!("match {} is not ready", next.id);
        }
        service.submit_result(next.id, score1, score2, &winner)?;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [sport, format, path] = args.as_slice() else {
        bail!("usage: bracket <sport> <format> <teams.csv>");
    };
    let sport: Sport = sport.parse()?;
    let format: Format = format.parse()?;

    let start = match std::env::var("BRACKET_START") {
        Ok(s) => DateTime::parse_from_rfc3339(&s)
            .with_context(|| format!("BRACKET_START {s:?} is not RFC 3339"))?
            .with_timezone(&Utc),
        Err(_) => default_start(),
    };
    let simulate_matches = std::env::var("BRACKET_SIMULATE")
        .ok()
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or_else(default_simulate);

    let teams = read_teams(Path::new(path))?;
    log::info!("Read {} teams from {}", teams.len(), path);

    let service = TournamentService::new(InMemoryStore::new(), LogNotifier);
    let (mut tournament, _) = service.create_tournament_at(sport, format, &teams, start)?;

    if simulate_matches {
        simulate(&service, &tournament)?;
        let progress = service.progress(tournament.id)?;
        if progress.can_complete {
            tournament = service.complete_tournament(tournament.id)?;
        } else {
            log::warn!(
                "{} of {} matches could not be played, tournament stays active",
                progress.pending_matches,
                progress.total_matches
            );
        }
    }

    let summary = Summary {
        bracket: service.bracket(tournament.id)?,
        progress: service.progress(tournament.id)?,
        standings: service.team_stats(tournament.id)?,
        podium: service.podium(tournament.id)?,
        tournament,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
