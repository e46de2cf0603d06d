//! Integration tests for the audit
//!
//! These tests use wiremock to create mock HTTP servers and run the batch
//! runner and the full read → audit → report cycle end-to-end.

use calamine::{open_workbook, Data, Reader, Xlsx};
use seo_audit::audit::{run_audit, BatchRunner, FetchOutcome, PageFetcher, ProgressEvent};
use seo_audit::config::{Config, FetcherConfig, UserAgentConfig};
use seo_audit::{AuditError, HttpStatus, Semaphore};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short timeout
fn create_test_config(timeout_secs: u64) -> Config {
    Config {
        fetcher: FetcherConfig { timeout_secs },
        user_agent: UserAgentConfig {
            crawler_name: "TestAuditor".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        ..Config::default()
    }
}

fn create_fetcher(timeout_secs: u64) -> PageFetcher {
    let config = create_test_config(timeout_secs);
    PageFetcher::from_config(&config.fetcher, &config.user_agent).expect("Failed to build client")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

/// Mounts the pages shared by most tests
/// Reads the first sheet of a report back as rows of cells
fn read_report(path: &std::path::Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Failed to open report");
    let range = workbook
        .worksheet_range_at(0)
        .expect("Report has no sheet")
        .expect("Failed to read sheet");
    range.rows().map(|row| row.to_vec()).collect()
}

/// Text of every cell except `Status`, with blank cells read as ""
fn text_cells(row: &[Data]) -> Vec<String> {
    row.iter()
        .enumerate()
        .filter(|(col, _)| *col != 1)
        .map(|(_, cell)| cell.to_string())
        .collect()
}

const HEADER: [&str; 7] = [
    "URL",
    "Status",
    "Indexable",
    "Title",
    "MetaTitle",
    "MetaDescription",
    "Semaforo",
];

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(html(
            "<html><head><title> Hi </title></head></html>",
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/full"))
        .respond_with(html(
            r#"<html><head>
                <title>Full page</title>
                <meta name="title" content=" Full meta title ">
                <meta name="description" content="Everything an auditor wants.">
                <meta name="robots" content="index, follow">
            </head><body>Hello</body></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/noindex"))
        .respond_with(html(
            r#"<html><head><title>Hidden</title><meta name="robots" content="NoIndex, Follow"></head></html>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<title>Not Found</title>"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetcher_outcomes() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let fetcher = create_fetcher(5);

    match fetcher.fetch(&format!("{}/home", server.uri())).await {
        FetchOutcome::Page {
            status: 200,
            body: Some(body),
        } => assert!(body.contains("<title> Hi </title>")),
        other => panic!("unexpected outcome {:?}", other),
    }

    // Non-200 responses never carry a body
    assert_eq!(
        fetcher.fetch(&format!("{}/missing", server.uri())).await,
        FetchOutcome::Page {
            status: 404,
            body: None
        }
    );
}

#[tokio::test]
async fn test_fetcher_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "TestAuditor/1.0.0"))
        .respond_with(html("<title>ua</title>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = create_fetcher(5)
        .fetch(&format!("{}/ua", server.uri()))
        .await;
    assert!(matches!(outcome, FetchOutcome::Page { status: 200, .. }));
}

#[tokio::test]
async fn test_fetcher_follows_redirects() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let target = format!("{}/home", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", target.as_str()))
        .mount(&server)
        .await;

    let outcome = create_fetcher(5)
        .fetch(&format!("{}/old", server.uri()))
        .await;
    assert!(matches!(outcome, FetchOutcome::Page { status: 200, body: Some(_) }));
}

#[tokio::test]
async fn test_green_page() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let runner = BatchRunner::new(create_fetcher(5));
    let sink = |_: &ProgressEvent| {};

    let results = runner
        .run(&[format!("{}/home", server.uri())], &sink)
        .await
        .expect("Audit failed");

    let result = &results[0];
    assert_eq!(result.status(), HttpStatus::Code(200));
    assert_eq!(result.title(), "Hi");
    assert_eq!(result.meta_title(), "");
    assert_eq!(result.meta_description(), "");
    assert!(result.indexable());
    assert_eq!(result.semaphore(), Semaphore::Green);
}

#[tokio::test]
async fn test_full_metadata() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let runner = BatchRunner::new(create_fetcher(5));
    let sink = |_: &ProgressEvent| {};

    let results = runner
        .run(&[format!("{}/full", server.uri())], &sink)
        .await
        .expect("Audit failed");

    let result = &results[0];
    assert_eq!(result.title(), "Full page");
    assert_eq!(result.meta_title(), "Full meta title");
    assert_eq!(result.meta_description(), "Everything an auditor wants.");
    assert!(result.indexable());
    assert_eq!(result.semaphore(), Semaphore::Green);
}

#[tokio::test]
async fn test_not_found_is_red() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let runner = BatchRunner::new(create_fetcher(5));
    let sink = |_: &ProgressEvent| {};

    let results = runner
        .run(&[format!("{}/missing", server.uri())], &sink)
        .await
        .expect("Audit failed");

    let result = &results[0];
    assert_eq!(result.status(), HttpStatus::Code(404));
    assert!(!result.indexable());
    assert_eq!(result.semaphore(), Semaphore::Red);
    // The 404 body is never parsed
    assert_eq!(result.title(), "");
    assert_eq!(result.meta_title(), "");
    assert_eq!(result.meta_description(), "");
}

#[tokio::test]
async fn test_timeout_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<title>late</title>").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let runner = BatchRunner::new(create_fetcher(1));
    let sink = |_: &ProgressEvent| {};

    let results = runner
        .run(&[format!("{}/slow", server.uri())], &sink)
        .await
        .expect("Audit failed");

    let result = &results[0];
    assert_eq!(result.status(), HttpStatus::FetchError);
    assert!(!result.indexable());
    assert_eq!(result.title(), "");
    assert_eq!(result.semaphore(), Semaphore::Red);
}

#[tokio::test]
async fn test_noindex_is_red() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let runner = BatchRunner::new(create_fetcher(5));
    let sink = |_: &ProgressEvent| {};

    let results = runner
        .run(&[format!("{}/noindex", server.uri())], &sink)
        .await
        .expect("Audit failed");

    let result = &results[0];
    assert_eq!(result.status(), HttpStatus::Code(200));
    assert_eq!(result.title(), "Hidden");
    assert!(!result.indexable());
    assert_eq!(result.semaphore(), Semaphore::Red);
}

#[tokio::test]
async fn test_order_length_and_progress() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let base = server.uri();

    let urls = vec![
        format!("{}/missing", base),
        format!("{}/home", base),
        "not a url".to_string(),
        format!("{}/broken", base),
        format!("{}/home", base),
        format!("{}/noindex", base),
    ];

    let events = Mutex::new(Vec::new());
    let sink = |event: &ProgressEvent| events.lock().unwrap().push(event.clone());

    let runner = BatchRunner::new(create_fetcher(5));
    let results = runner.run(&urls, &sink).await.expect("Audit failed");

    // One result per input URL, in input order, duplicates included
    assert_eq!(results.len(), urls.len());
    for (result, url) in results.iter().zip(&urls) {
        assert_eq!(result.url(), url.as_str());
    }

    let statuses: Vec<_> = results.iter().map(|r| r.status()).collect();
    assert_eq!(
        statuses,
        vec![
            HttpStatus::Code(404),
            HttpStatus::Code(200),
            HttpStatus::FetchError,
            HttpStatus::Code(500),
            HttpStatus::Code(200),
            HttpStatus::Code(200),
        ]
    );

    // Semaphore follows only from status and indexability
    for result in &results {
        let expected = if result.status().is_ok() && result.indexable() {
            Semaphore::Green
        } else {
            Semaphore::Red
        };
        assert_eq!(result.semaphore(), expected);
    }

    let events = events.into_inner().unwrap();
    assert_eq!(events.len(), urls.len());
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.index, i + 1);
        assert_eq!(event.total, urls.len());
        assert_eq!(event.url, urls[i]);
    }
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let urls = vec![
        format!("{}/full", server.uri()),
        format!("{}/noindex", server.uri()),
        format!("{}/missing", server.uri()),
    ];
    let runner = BatchRunner::new(create_fetcher(5));
    let sink = |_: &ProgressEvent| {};

    let first = runner.run(&urls, &sink).await.expect("Audit failed");
    let second = runner.run(&urls, &sink).await.expect("Audit failed");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_full_audit_writes_report() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("urls.txt");
    std::fs::write(
        &input,
        format!(
            "  {base}/home  \n\n   \n{base}/missing\n{base}/noindex\nnot a url\n",
            base = server.uri()
        ),
    )
    .expect("Failed to write URL list");

    let events = Mutex::new(Vec::new());
    let sink = |event: &ProgressEvent| events.lock().unwrap().push(event.clone());

    let outcome = run_audit(
        &input,
        &create_test_config(5),
        &sink,
        CancellationToken::new(),
    )
    .await
    .expect("Audit failed");

    // Blank lines are not URLs, surrounding whitespace is trimmed
    assert_eq!(outcome.results.len(), 4);
    assert_eq!(outcome.results[0].url(), format!("{}/home", server.uri()));
    assert_eq!(events.lock().unwrap().len(), 4);

    assert_eq!(outcome.statistics.total, 4);
    assert_eq!(outcome.statistics.count(Semaphore::Green), 1);
    assert_eq!(outcome.statistics.count(Semaphore::Red), 3);
    assert_eq!(outcome.statistics.fetch_errors, 1);

    let expected_report = dir.path().join("seo_auditoria_semaforo.xlsx");
    assert_eq!(outcome.report_path, expected_report);
    assert!(outcome.finished_at >= outcome.started_at);

    let rows = read_report(&expected_report);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], HEADER.map(|h| Data::String(h.to_string())).to_vec());

    let base = server.uri();
    assert_eq!(rows[1][1], Data::Float(200.0));
    assert_eq!(
        text_cells(&rows[1]),
        [format!("{}/home", base).as_str(), "SI", "Hi", "", "", "🟢"]
    );

    assert_eq!(rows[2][1], Data::Float(404.0));
    assert_eq!(
        text_cells(&rows[2]),
        [format!("{}/missing", base).as_str(), "NO", "", "", "", "🔴"]
    );

    assert_eq!(rows[3][1], Data::Float(200.0));
    assert_eq!(
        text_cells(&rows[3]),
        [format!("{}/noindex", base).as_str(), "NO", "Hidden", "", "", "🔴"]
    );

    assert_eq!(rows[4][1], Data::String("Error".to_string()));
    assert_eq!(text_cells(&rows[4]), ["not a url", "NO", "", "", "", "🔴"]);
}

#[tokio::test]
async fn test_empty_input_writes_header_only_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("urls.txt");
    std::fs::write(&input, "\n   \n\t\n").expect("Failed to write URL list");
    let sink = |_: &ProgressEvent| {};

    let outcome = run_audit(
        &input,
        &create_test_config(5),
        &sink,
        CancellationToken::new(),
    )
    .await
    .expect("Audit failed");

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.statistics.total, 0);

    let rows = read_report(&outcome.report_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], HEADER.map(|h| Data::String(h.to_string())).to_vec());
}

#[tokio::test]
async fn test_missing_input_is_input_read_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("does-not-exist.txt");

    let events = Mutex::new(Vec::new());
    let sink = |event: &ProgressEvent| events.lock().unwrap().push(event.clone());

    let result = run_audit(
        &input,
        &create_test_config(5),
        &sink,
        CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(AuditError::InputRead { .. })));
    assert!(events.lock().unwrap().is_empty());
    assert!(!dir.path().join("seo_auditoria_semaforo.xlsx").exists());
}

#[tokio::test]
async fn test_unwritable_report_is_output_write_error() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("urls.txt");
    std::fs::write(&input, format!("{}/home\n", server.uri())).expect("Failed to write URL list");

    // A directory squatting on the report name makes the write fail
    std::fs::create_dir(dir.path().join("seo_auditoria_semaforo.xlsx"))
        .expect("Failed to create blocking directory");

    let events = Mutex::new(Vec::new());
    let sink = |event: &ProgressEvent| events.lock().unwrap().push(event.clone());

    let result = run_audit(
        &input,
        &create_test_config(5),
        &sink,
        CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(AuditError::OutputWrite { .. })));
    // The URL was still processed before the write failed
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancellation_stops_between_urls() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let urls = vec![
        format!("{}/home", server.uri()),
        format!("{}/full", server.uri()),
        format!("{}/noindex", server.uri()),
    ];

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    // Cancel as soon as the second URL is announced; it still completes
    let sink = move |event: &ProgressEvent| {
        if event.index == 2 {
            token.cancel();
        }
    };

    let runner = BatchRunner::new(create_fetcher(5)).with_cancellation(cancel);
    let result = runner.run(&urls, &sink).await;

    assert!(matches!(
        result,
        Err(AuditError::Cancelled {
            processed: 2,
            total: 3
        })
    ));
}
