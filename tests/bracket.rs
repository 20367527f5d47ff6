//! Integration tests for bracket generation: layout, pairings, edges, and schedule.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sports_bracket::{
    generate, Bracket, Format, Round, Side, Sport, TournamentError, PLACEHOLDER,
};
use std::collections::HashMap;
use uuid::Uuid;

fn teams(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("T{i}")).collect()
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
}

fn build(sport: Sport, format: Format, n: usize) -> Bracket {
    generate(Uuid::new_v4(), sport, format, &teams(n), start()).unwrap()
}

fn round_sizes(bracket: &Bracket) -> Vec<(Round, usize)> {
    bracket
        .rounds
        .iter()
        .map(|r| (r.round, r.matches.len()))
        .collect()
}

#[test]
fn eight_volleyball_teams_make_the_standard_layout() {
    let bracket = build(Sport::Volleyball, Format::Standard, 8);

    assert_eq!(
        round_sizes(&bracket),
        vec![
            (Round::FirstRound, 4),
            (Round::Quarterfinal, 2),
            (Round::Semifinal, 2),
            (Round::ThirdPlace, 1),
            (Round::Final, 1),
        ]
    );

    let pairings: Vec<(&str, &str)> = bracket
        .round(Round::FirstRound)
        .unwrap()
        .iter()
        .map(|m| (m.team1.as_str(), m.team2.as_str()))
        .collect();
    assert_eq!(
        pairings,
        vec![("T1", "T2"), ("T3", "T4"), ("T5", "T6"), ("T7", "T8")]
    );

    for m in bracket.matches().filter(|m| m.round != Round::FirstRound) {
        assert_eq!(m.team1, PLACEHOLDER);
        assert_eq!(m.team2, PLACEHOLDER);
        assert!(!m.is_completed());
    }
}

#[test]
fn generation_is_deterministic() {
    let a = build(Sport::Soccer, Format::Standard, 16);
    let b = build(Sport::Soccer, Format::Standard, 16);

    assert_eq!(a.round_names(), b.round_names());
    assert_eq!(round_sizes(&a), round_sizes(&b));
    let pairs = |bracket: &Bracket| -> Vec<(String, String)> {
        bracket
            .round(Round::FirstRound)
            .unwrap()
            .iter()
            .map(|m| (m.team1.clone(), m.team2.clone()))
            .collect()
    };
    assert_eq!(pairs(&a), pairs(&b));
}

#[test]
fn pairing_follows_submission_order_not_names() {
    let teams: Vec<String> = ["Zebras", "Ants", "Moles", "Bees", "Owls", "Cats", "Yaks", "Dogs"]
        .into_iter()
        .map(String::from)
        .collect();
    let bracket = generate(Uuid::new_v4(), Sport::Soccer, Format::Standard, &teams, start()).unwrap();
    let first = &bracket.round(Round::FirstRound).unwrap()[0];
    assert_eq!((first.team1.as_str(), first.team2.as_str()), ("Zebras", "Ants"));
}

#[test]
fn fewer_teams_than_the_minimum_fail() {
    for sport in Sport::ALL {
        let result = generate(Uuid::new_v4(), sport, Format::Standard, &teams(7), start());
        assert!(matches!(
            result,
            Err(TournamentError::NotEnoughTeams { required: 8, actual: 7, .. })
        ));
        assert!(generate(Uuid::new_v4(), sport, Format::Standard, &teams(8), start()).is_ok());
    }
}

#[test]
fn rainy_is_rejected_outside_table_tennis() {
    for sport in [Sport::Volleyball, Sport::Soccer] {
        let result = generate(Uuid::new_v4(), sport, Format::Rainy, &teams(8), start());
        assert_eq!(
            result,
            Err(TournamentError::InvalidFormat {
                sport,
                format: Format::Rainy
            })
        );
    }
}

#[test]
fn rainy_table_tennis_adds_a_loser_bracket() {
    let bracket = build(Sport::TableTennis, Format::Rainy, 8);
    assert_eq!(
        round_sizes(&bracket),
        vec![
            (Round::FirstRound, 4),
            (Round::Quarterfinal, 2),
            (Round::Semifinal, 2),
            (Round::LoserBracket, 2),
            (Round::ThirdPlace, 1),
            (Round::Final, 1),
        ]
    );

    let loser_bracket = bracket.round(Round::LoserBracket).unwrap();
    for (i, m) in bracket.round(Round::FirstRound).unwrap().iter().enumerate() {
        let slot = m.loser_to.expect("first-round losers drop to the loser bracket");
        assert_eq!(slot.match_id, loser_bracket[i / 2].id);
        assert_eq!(slot.side, Side::from_parity(i));
    }
    let third = &bracket.round(Round::ThirdPlace).unwrap()[0];
    for m in loser_bracket {
        assert_eq!(m.winner_to.unwrap().match_id, third.id);
    }
    for m in bracket.round(Round::Semifinal).unwrap() {
        assert!(m.loser_to.is_none());
    }
}

#[test]
fn sixteen_teams_halve_into_quarterfinals() {
    let bracket = build(Sport::Volleyball, Format::Standard, 16);
    assert_eq!(
        round_sizes(&bracket),
        vec![
            (Round::FirstRound, 8),
            (Round::Quarterfinal, 4),
            (Round::Semifinal, 2),
            (Round::ThirdPlace, 1),
            (Round::Final, 1),
        ]
    );
    let semis = bracket.round(Round::Semifinal).unwrap();
    for (j, m) in bracket.round(Round::Quarterfinal).unwrap().iter().enumerate() {
        assert_eq!(m.winner_to.unwrap().match_id, semis[j / 2].id);
        assert!(m.loser_to.is_none());
    }
}

#[test]
fn unsupported_sizes_are_rejected() {
    for (format, n) in [(Format::Standard, 10), (Format::Standard, 12), (Format::Standard, 32), (Format::Rainy, 16)] {
        let result = generate(Uuid::new_v4(), Sport::TableTennis, format, &teams(n), start());
        assert!(matches!(result, Err(TournamentError::Validation(_))), "{format} {n}");
    }
}

#[test]
fn bad_team_names_are_rejected() {
    let mut duplicate = teams(8);
    duplicate[5] = "t1".to_string();
    let mut reserved = teams(8);
    reserved[0] = "TBD".to_string();
    let mut blank = teams(8);
    blank[3] = "   ".to_string();

    for list in [duplicate, reserved, blank] {
        let result = generate(Uuid::new_v4(), Sport::Soccer, Format::Standard, &list, start());
        assert!(matches!(result, Err(TournamentError::Validation(_))));
    }
}

#[test]
fn placeholder_slots_have_at_most_one_feeder() {
    for (sport, format, n) in [
        (Sport::Volleyball, Format::Standard, 8),
        (Sport::Soccer, Format::Standard, 16),
        (Sport::TableTennis, Format::Rainy, 8),
    ] {
        let bracket = build(sport, format, n);
        let mut feeders: HashMap<(Uuid, Side), usize> = HashMap::new();
        for m in bracket.matches() {
            for slot in [m.winner_to, m.loser_to].into_iter().flatten() {
                *feeders.entry((slot.match_id, slot.side)).or_default() += 1;
            }
        }
        assert!(feeders.values().all(|&count| count == 1), "{format} {n}");

        let mut unfed = Vec::new();
        for m in bracket.matches().filter(|m| m.round != Round::FirstRound) {
            for side in [Side::One, Side::Two] {
                if !feeders.contains_key(&(m.id, side)) {
                    unfed.push((m.id, side));
                }
            }
        }
        // Two quarterfinals only ever fill the first semifinal.
        let expected = if n == 8 {
            let second_semifinal = bracket.round(Round::Semifinal).unwrap()[1].id;
            vec![(second_semifinal, Side::One), (second_semifinal, Side::Two)]
        } else {
            Vec::new()
        };
        assert_eq!(unfed, expected, "{format} {n}");
    }
}

#[test]
fn eight_team_quarterfinal_winners_meet_in_the_first_semifinal() {
    let bracket = build(Sport::Volleyball, Format::Standard, 8);
    let first_semifinal = bracket.round(Round::Semifinal).unwrap()[0].id;
    for (j, m) in bracket.round(Round::Quarterfinal).unwrap().iter().enumerate() {
        let slot = m.winner_to.unwrap();
        assert_eq!(slot.match_id, first_semifinal);
        assert_eq!(slot.side, Side::from_parity(j));
        assert!(m.loser_to.is_none());
    }
}

#[test]
fn losers_never_drop_into_a_winners_round() {
    for (sport, format, n) in [
        (Sport::Volleyball, Format::Standard, 8),
        (Sport::Soccer, Format::Standard, 16),
        (Sport::TableTennis, Format::Rainy, 8),
    ] {
        let bracket = build(sport, format, n);
        let rounds: HashMap<Uuid, Round> = bracket.matches().map(|m| (m.id, m.round)).collect();
        for m in bracket.matches() {
            if let Some(slot) = m.loser_to {
                assert!(
                    matches!(rounds[&slot.match_id], Round::LoserBracket | Round::ThirdPlace),
                    "{format} {n}: {} loser goes to {}",
                    m.round,
                    rounds[&slot.match_id]
                );
            }
        }
    }
}

#[test]
fn final_and_third_place_lead_nowhere() {
    let bracket = build(Sport::Volleyball, Format::Standard, 8);
    for round in [Round::Final, Round::ThirdPlace] {
        let m = &bracket.round(round).unwrap()[0];
        assert!(m.winner_to.is_none());
        assert!(m.loser_to.is_none());
    }
}

#[test]
fn matches_are_spaced_per_sport_and_strictly_increasing() {
    for (sport, minutes) in [
        (Sport::Volleyball, 30),
        (Sport::TableTennis, 20),
        (Sport::Soccer, 45),
    ] {
        let bracket = build(sport, Format::Standard, 8);
        let times: Vec<_> = bracket.matches().map(|m| m.scheduled_at).collect();
        assert_eq!(times[0], start());
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(minutes));
        }
    }
}

#[test]
fn team_names_are_trimmed() {
    let mut list = teams(8);
    list[0] = "  T1  ".to_string();
    let bracket = generate(Uuid::new_v4(), Sport::Soccer, Format::Standard, &list, start()).unwrap();
    assert_eq!(bracket.round(Round::FirstRound).unwrap()[0].team1, "T1");
}
