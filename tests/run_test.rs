mod common;

use std::time::Duration;

use chrono::{Days, Local};
use common::{results_page, FakeSession, RowSpec};
use flight_scout::{run, Error, Reporter, ResultStore, RunSeparator, ScrapeConfig, SearchRequest};

fn request() -> SearchRequest {
    let date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(10))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string();
    SearchRequest::new("PAR", "SFO", &date).unwrap()
}

fn config(dir: &tempfile::TempDir) -> ScrapeConfig {
    ScrapeConfig {
        ready_timeout: Duration::from_millis(20),
        results_path: dir.path().join("results.json"),
        ..ScrapeConfig::default()
    }
}

#[tokio::test]
async fn test_two_complete_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let store = ResultStore::from_config(&config);
    let session = FakeSession::serving(results_page(&[
        RowSpec::complete("7:00 AM", "3:25 PM", "8H, 25M", "$1,053"),
        RowSpec::complete("1:10 PM", "9:40 PM", "8H, 30M", "$987"),
    ]));
    let mut reporter = Reporter::new(Vec::new());

    let flights = run::execute(session.clone(), &request(), &config, &store, &mut reporter)
        .await
        .expect("run")
        .expect("result set");

    assert_eq!(flights.len(), 2);
    for flight in &flights {
        let fields = [
            &flight.departure_time,
            &flight.arrival_time,
            &flight.duration,
            &flight.price,
        ];
        for field in fields {
            assert!(!field.starts_with("No "), "unexpected sentinel in {flight:?}");
        }
    }

    let console = String::from_utf8(reporter.into_inner()).unwrap();
    assert_eq!(console.matches("Flight PAR - SFO:").count(), 2);
    assert!(console.lines().last().unwrap().starts_with("[FlightRecord {"));

    assert_eq!(store.read_runs().unwrap(), vec![flights]);
    assert!(session.was_closed());
}

#[tokio::test]
async fn test_search_url_sent_to_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let session = FakeSession::serving(results_page(&[]));
    let request = request();

    run::execute(
        session.clone(),
        &request,
        &config,
        &ResultStore::from_config(&config),
        &mut Reporter::new(Vec::new()),
    )
    .await
    .unwrap();

    let date = request.date().format("%Y-%m-%d").to_string();
    assert_eq!(
        session.opened_urls(),
        vec![format!(
            "https://www.united.com/en/us/fsr/choose-flights?f=PAR&t=SFO&d={date}"
        )]
    );
}

#[tokio::test]
async fn test_marker_never_renders() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let store = ResultStore::from_config(&config);
    let session = FakeSession::serving("<html><body><p>Loading flights...</p></body></html>");
    let mut reporter = Reporter::new(Vec::new());

    let outcome = run::execute(session.clone(), &request(), &config, &store, &mut reporter)
        .await
        .expect("timeout is contained");

    assert!(outcome.is_none());
    assert!(session.was_closed());
    assert!(!store.path().exists(), "store must not be touched");

    let console = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(console.starts_with("Parsing finished with error: Timeout waiting for:"));
}

#[tokio::test]
async fn test_navigation_failure_still_closes_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let session = FakeSession::unreachable();

    let err = run::execute(
        session.clone(),
        &request(),
        &config,
        &ResultStore::from_config(&config),
        &mut Reporter::new(Vec::new()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::NavigationError(_)));
    assert!(session.was_closed());
}

#[tokio::test]
async fn test_runs_append_back_to_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let store = ResultStore::new(&config.results_path, RunSeparator::None);
    let page = results_page(&[RowSpec::complete("7:00 AM", "3:25 PM", "8H, 25M", "$1,053")]);

    for _ in 0..2 {
        run::execute(
            FakeSession::serving(page.clone()),
            &request(),
            &config,
            &store,
            &mut Reporter::new(Vec::new()),
        )
        .await
        .unwrap()
        .unwrap();
    }

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("]["), "payloads are not delimited: {raw}");
    assert!(!raw.contains('\n'));
    assert_eq!(store.read_runs().unwrap().len(), 2);
}
