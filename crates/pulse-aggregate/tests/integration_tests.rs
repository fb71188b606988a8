//! Integration tests for pulse-aggregate
//!
//! These tests drive complete full and incremental runs through the public
//! API and check the resulting document.

use chrono::{DateTime, TimeZone, Utc};
use pulse_aggregate::{AggregateError, Aggregator, AggregatorConfig, RunRequest};
use pulse_domain::{CountryDirectory, Event, PriorDocument, RankingKind, SummaryDocument};

fn config() -> AggregatorConfig {
    AggregatorConfig {
        top_pairs: 2,
        weeks_history: 8,
        recent_weeks: 2,
        ranking_limit: 10,
    }
}

/// Wednesday; the axis runs from 2024-01-15 to 2024-03-04
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 8, 0, 0).unwrap()
}

fn countries() -> CountryDirectory {
    [
        ("CHN", "China"),
        ("USA", "United States"),
        ("RUS", "Russia"),
        ("UKR", "Ukraine"),
        ("FRA", "France"),
        ("DEU", "Germany"),
    ]
    .into_iter()
    .collect()
}

fn event(date: &str, a: &str, b: &str, goldstein: f64, class: i64) -> Event {
    Event::new(date, a, b)
        .with_goldstein(goldstein)
        .with_class(class)
        .with_mentions(2)
}

fn history() -> Vec<Event> {
    vec![
        event("20240213", "UKR", "RUS", -9.0, 4),
        event("20240227", "RUS", "UKR", -8.0, 4),
        event("20240227", "RUS", "UKR", -6.0, 4),
        event("20240228", "UKR", "RUS", -10.0, 3),
        event("20240305", "RUS", "UKR", -4.0, 4),
        event("20240305", "RUS", "UKR", -2.0, 3),
        event("20240220", "USA", "CHN", 4.0, 1),
        event("20240221", "CHN", "USA", 2.0, 2),
        event("20240304", "USA", "CHN", 1.0, 1),
        event("20240304", "FRA", "DEU", 7.0, 1),
    ]
}

fn full_run(events: &[Event]) -> SummaryDocument {
    let countries = countries();
    let mut aggregator = Aggregator::new(config());
    aggregator
        .run(RunRequest::full(events, &countries, now()))
        .unwrap()
        .expect("non-empty batch produces a document")
}

fn incremental_run(events: &[Event], prior: &PriorDocument) -> SummaryDocument {
    let countries = countries();
    let mut aggregator = Aggregator::new(config());
    aggregator
        .run(RunRequest::incremental(events, Some(prior), &countries, now()))
        .unwrap()
        .expect("non-empty batch produces a document")
}

#[test]
fn test_full_run_document() {
    let doc = full_run(&history());

    assert_eq!(doc.generated_at, "2024-03-06T08:00:00Z");
    assert_eq!(doc.weeks.len(), 8);
    assert_eq!(doc.weeks[0].to_string(), "2024-01-15");
    assert_eq!(doc.weeks[7].to_string(), "2024-03-04");

    let ids: Vec<String> = doc.pairs.iter().map(|p| p.pair_id()).collect();
    assert_eq!(ids, vec!["RUS-UKR", "CHN-USA"]);

    let rus_ukr = doc.find_pair("RUS-UKR").unwrap();
    assert_eq!(rus_ukr.label, "Russia \u{2014} Ukraine");
    assert_eq!(rus_ukr.total_events, 6);
    assert_eq!(rus_ukr.recent_avg_goldstein, Some(-5.5));
    assert_eq!(rus_ukr.trend, Some(3.5));
    assert_eq!(rus_ukr.data.len(), 8);
    assert_eq!(rus_ukr.data[6].total, 3);
    assert_eq!(rus_ukr.data[6].conf, 3);
    assert_eq!(rus_ukr.data[6].mentions, 6);

    let chn_usa = doc.find_pair("CHN-USA").unwrap();
    assert_eq!(chn_usa.recent_avg_goldstein, Some(1.0));
    assert_eq!(chn_usa.trend, Some(-2.0));
    assert_eq!(chn_usa.data[5].coop, 2);

    assert_eq!(doc.rankings.most_conflictual, vec!["RUS-UKR", "CHN-USA"]);
    assert_eq!(doc.rankings.most_cooperative, vec!["CHN-USA", "RUS-UKR"]);
    assert_eq!(doc.rankings.biggest_shifts, vec!["RUS-UKR", "CHN-USA"]);

    let codes: Vec<&str> = doc.countries.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["CHN", "RUS", "UKR", "USA"]);
}

#[test]
fn test_ranked_pairs_resolve_to_records() {
    let doc = full_run(&history());
    let coop = doc.ranked_pairs(RankingKind::MostCooperative);
    assert_eq!(coop[0].actor1, "CHN");
    assert_eq!(coop[0].actor2, "USA");
}

#[test]
fn test_incremental_overwrites_fresh_weeks() {
    let prior = PriorDocument::from(&full_run(&history()));
    let fresh = vec![event("20240306", "UKR", "RUS", 2.0, 1)];
    let doc = incremental_run(&fresh, &prior);

    let rus_ukr = doc.find_pair("RUS-UKR").unwrap();
    // 2024-03-04 replaced; 2024-02-26 and 2024-02-12 replayed untouched
    assert_eq!(rus_ukr.data[7].total, 1);
    assert_eq!(rus_ukr.data[7].avg_goldstein, Some(2.0));
    assert_eq!(rus_ukr.data[6].total, 3);
    assert_eq!(rus_ukr.data[4].total, 1);
    assert_eq!(rus_ukr.total_events, 5);
    assert_eq!(rus_ukr.recent_avg_goldstein, Some(-3.0));
    assert_eq!(rus_ukr.trend, Some(6.0));

    // untouched pair survives from history
    assert_eq!(doc.find_pair("CHN-USA").unwrap().total_events, 3);
}

#[test]
fn test_incremental_run_is_idempotent() {
    let prior = PriorDocument::from(&full_run(&history()));
    let fresh = vec![
        event("20240306", "UKR", "RUS", 2.0, 1),
        event("20240305", "CHN", "USA", -1.5, 3),
    ];

    let first = incremental_run(&fresh, &prior);
    let second = incremental_run(&fresh, &PriorDocument::from(&first));
    assert_eq!(first, second);
}

#[test]
fn test_incremental_replays_written_json() {
    let written = serde_json::to_string(&full_run(&history())).unwrap();
    let from_json: PriorDocument = serde_json::from_str(&written).unwrap();
    let fresh = vec![event("20240306", "UKR", "RUS", 2.0, 1)];

    let via_json = incremental_run(&fresh, &from_json);
    let via_memory = incremental_run(&fresh, &PriorDocument::from(&full_run(&history())));
    assert_eq!(via_json, via_memory);
}

#[test]
fn test_incremental_without_prior_uses_batch_only() {
    let countries = countries();
    let mut aggregator = Aggregator::new(config());
    let fresh = vec![event("20240306", "UKR", "RUS", 2.0, 1)];
    let doc = aggregator
        .run(RunRequest::incremental(&fresh, None, &countries, now()))
        .unwrap()
        .unwrap();

    assert_eq!(doc.pairs.len(), 1);
    assert_eq!(doc.pairs[0].total_events, 1);
}

#[test]
fn test_empty_batch_writes_nothing() {
    let prior = PriorDocument::from(&full_run(&history()));
    let countries = countries();
    let mut aggregator = Aggregator::new(config());

    let result = aggregator
        .run(RunRequest::incremental(&[], Some(&prior), &countries, now()))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_malformed_date_fails_run() {
    let countries = countries();
    let mut aggregator = Aggregator::new(config());
    let events = vec![
        event("20240305", "RUS", "UKR", -4.0, 4),
        event("2024-02-31", "RUS", "UKR", -4.0, 4),
    ];

    let result = aggregator.run(RunRequest::full(&events, &countries, now()));
    assert!(matches!(result, Err(AggregateError::Domain(_))));
    assert_eq!(aggregator.metrics().run_count, 0);
}

#[test]
fn test_top_pairs_bound() {
    let codes = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"];
    let events: Vec<Event> = codes
        .windows(2)
        .map(|w| event("20240305", w[0], w[1], 1.0, 1))
        .collect();
    let doc = full_run(&events);

    assert_eq!(doc.pairs.len(), 2);
    assert!(doc.rankings.most_conflictual.len() <= 2);
    assert_eq!(doc.pairs[0].label, "AAA \u{2014} BBB");
    assert_eq!(doc.countries["AAA"], "AAA");
}

#[test]
fn test_off_axis_weeks_count_toward_selection_only() {
    let mut events: Vec<Event> = (0..5).map(|_| event("20230605", "ISR", "PSE", -5.0, 4)).collect();
    events.push(event("20240305", "ISR", "PSE", -3.0, 4));
    events.extend((0..3).map(|_| event("20240305", "CHN", "USA", 1.0, 1)));
    events.extend((0..2).map(|_| event("20240305", "FRA", "DEU", 1.0, 1)));
    let doc = full_run(&events);

    let ids: Vec<String> = doc.pairs.iter().map(|p| p.pair_id()).collect();
    assert_eq!(ids, vec!["ISR-PSE", "CHN-USA"]);
    assert_eq!(doc.find_pair("ISR-PSE").unwrap().total_events, 1);
}

#[test]
fn test_document_json_shape() {
    let doc = full_run(&history());
    let value = serde_json::to_value(&doc).unwrap();

    for key in ["generated_at", "weeks", "pairs", "rankings", "countries"] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(value["weeks"][0], "2024-01-15");

    let pair = &value["pairs"][0];
    for key in ["actor1", "actor2", "label", "total_events", "recent_avg_goldstein", "trend", "data"] {
        assert!(pair.get(key).is_some(), "missing pair key {key}");
    }

    let gap = &pair["data"][0];
    assert_eq!(gap["week"], "2024-01-15");
    assert!(gap["avg_goldstein"].is_null());
    assert_eq!(gap["total"], 0);
    assert_eq!(gap["coop"], 0);
    assert_eq!(gap["conf"], 0);
    assert_eq!(gap["mentions"], 0);

    assert!(value["rankings"]["most_conflictual"].is_array());
    assert!(value["rankings"]["biggest_shifts"].is_array());
    assert_eq!(value["countries"]["UKR"], "Ukraine");
}
