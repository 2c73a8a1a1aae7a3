use chrono::NaiveDate;

use fixture_desk::config::FilterLexicon;
use fixture_desk::fixture_store::{ALL_COMPETITIONS, FilterState, run_pipeline};
use fixture_desk::model::{Competition, Fixture};

fn competition(name: &str, senior_grade: bool) -> Competition {
    Competition {
        id: format!("comp-{name}"),
        name: name.to_string(),
        shortname: String::new(),
        year: 2026,
        senior_grade,
    }
}

fn fixture(id: i64, home: &str, away: &str, competition: Option<Competition>) -> Fixture {
    Fixture {
        id,
        external_id: 0,
        home_team: home.to_string(),
        away_team: away.to_string(),
        venue: "Main Grounds".to_string(),
        pitch: "1".to_string(),
        date: 1_750_000_000_000,
        home_score: String::new(),
        away_score: String::new(),
        referee_name: String::new(),
        permission_sought: false,
        permission_obtained: false,
        comment: None,
        competition_id: 0,
        competition,
        time: 0,
    }
}

fn club_lexicon() -> FilterLexicon {
    FilterLexicon {
        club_marker: "club a".to_string(),
        ..FilterLexicon::default()
    }
}

fn ids(fixtures: &[Fixture]) -> Vec<i64> {
    fixtures.iter().map(|f| f.id).collect()
}

#[test]
fn derived_collection_is_subset_of_raw() {
    let raw = vec![
        fixture(1, "Club A", "Rivals", Some(competition("League", true))),
        fixture(2, "Other", "Other2", Some(competition("League", true))),
        fixture(3, "Club A Minors", "Rivals", None),
    ];
    let filter = FilterState::new(club_lexicon());
    let out = run_pipeline(&raw, &filter);
    for kept in &out {
        assert!(raw.iter().any(|f| f.id == kept.id), "synthesized record {}", kept.id);
    }
}

#[test]
fn pipeline_is_idempotent_for_unchanged_inputs() {
    let raw = vec![
        fixture(1, "Club A", "Rivals", Some(competition("League", true))),
        fixture(2, "Club A", "Others", Some(competition("Cup", false))),
        fixture(3, "Nobody", "Else", None),
    ];
    let mut filter = FilterState::new(club_lexicon());
    filter.competition_name = "League".to_string();
    let first = run_pipeline(&raw, &filter);
    let second = run_pipeline(&raw, &filter);
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first, second);
}

#[test]
fn all_sentinel_is_equivalent_to_no_competition_stage() {
    let raw = vec![
        fixture(1, "Club A", "Rivals", Some(competition("League", false))),
        fixture(2, "Club A", "Others", Some(competition("Cup", false))),
        fixture(3, "Club A", "More", None),
    ];
    let filter = FilterState::new(club_lexicon());
    assert_eq!(filter.competition_name, ALL_COMPETITIONS);
    let out = run_pipeline(&raw, &filter);
    // Every stage-1 survivor passes; nothing is dropped by competition name.
    assert_eq!(ids(&out), vec![1, 2, 3]);
}

#[test]
fn competition_name_filter_is_exact_match() {
    let raw = vec![
        fixture(1, "Club A", "Rivals", Some(competition("League", false))),
        fixture(2, "Club A", "Others", Some(competition("League Two", false))),
        fixture(3, "Club A", "More", None),
    ];
    let mut filter = FilterState::new(club_lexicon());
    filter.competition_name = "League".to_string();
    let out = run_pipeline(&raw, &filter);
    // Substring matches and absent competitions both fail the exact stage.
    assert_eq!(ids(&out), vec![1]);
}

#[test]
fn club_and_event_scenario() {
    let raw = vec![
        fixture(1, "Club A", "Club B", Some(competition("Event Series", false))),
        fixture(2, "Other", "Other2", Some(competition("League", true))),
    ];
    let filter = FilterState::new(club_lexicon());
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![1]);
}

#[test]
fn event_competition_admits_fixture_without_club_team() {
    let raw = vec![fixture(
        9,
        "Strangers",
        "More Strangers",
        Some(competition("County Event Night", false)),
    )];
    let filter = FilterState::new(club_lexicon());
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![9]);
}

#[test]
fn club_match_is_case_insensitive_on_either_side() {
    let raw = vec![
        fixture(1, "CLUB A SENIORS", "Rivals", None),
        fixture(2, "Rivals", "club a juniors", None),
    ];
    let filter = FilterState::new(club_lexicon());
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![1, 2]);
}

#[test]
fn hiding_senior_grade_keeps_fixture_without_competition() {
    let raw = vec![
        fixture(1, "Club A", "Rivals", Some(competition("League", true))),
        fixture(2, "Club A", "Others", None),
    ];
    let mut filter = FilterState::new(club_lexicon());
    filter.show_senior_grade = false;
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![2]);
}

#[test]
fn hiding_underage_grade_is_symmetric() {
    let raw = vec![
        fixture(1, "Club A", "Rivals", Some(competition("Minor League", false))),
        fixture(2, "Club A", "Others", Some(competition("League", true))),
        fixture(3, "Club A", "More", None),
    ];
    let mut filter = FilterState::new(club_lexicon());
    filter.show_underage_grade = false;
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![2, 3]);
}

#[test]
fn no_competition_survives_both_grade_stages() {
    let raw = vec![fixture(5, "Club A", "Rivals", None)];
    let mut filter = FilterState::new(club_lexicon());
    filter.show_senior_grade = false;
    filter.show_underage_grade = false;
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![5]);
}

fn at_midnight(year: i32, month: u32, day: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
        .and_utc()
        .timestamp_millis()
}

#[test]
fn date_window_bounds_are_inclusive_per_day() {
    let mut early = fixture(1, "Club A", "Rivals", None);
    early.date = at_midnight(2026, 5, 1);
    let mut lower_edge = fixture(2, "Club A", "Rivals", None);
    lower_edge.date = at_midnight(2026, 5, 5);
    let mut late_in_upper_day = fixture(3, "Club A", "Rivals", None);
    late_in_upper_day.date = at_midnight(2026, 5, 10) + 19 * 3600 * 1000;
    let mut past = fixture(4, "Club A", "Rivals", None);
    past.date = at_midnight(2026, 5, 11);

    let mut filter = FilterState::new(club_lexicon());
    filter.from_date = NaiveDate::from_ymd_opt(2026, 5, 5);
    filter.to_date = NaiveDate::from_ymd_opt(2026, 5, 10);

    let raw = vec![early, lower_edge, late_in_upper_day, past];
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![2, 3]);
}

#[test]
fn unset_date_bounds_pass_everything() {
    let mut far_past = fixture(1, "Club A", "Rivals", None);
    far_past.date = 0;
    let mut far_future = fixture(2, "Club A", "Rivals", None);
    far_future.date = i64::MAX / 2;
    let filter = FilterState::new(club_lexicon());
    let out = run_pipeline(&[far_past, far_future], &filter);
    assert_eq!(ids(&out), vec![1, 2]);
}

#[test]
fn stages_apply_in_order_not_in_union() {
    // A senior fixture for another club must already be gone before the
    // grade stage could have kept it visible.
    let raw = vec![
        fixture(1, "Other", "Other2", Some(competition("League", true))),
        fixture(2, "Club A", "Rivals", Some(competition("League", true))),
    ];
    let mut filter = FilterState::new(club_lexicon());
    filter.competition_name = "League".to_string();
    let out = run_pipeline(&raw, &filter);
    assert_eq!(ids(&out), vec![2]);
}
