//! Integration tests for complete harvest runs against a mock search endpoint.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use harvest_core::fallback::{AcquisitionTool, FallbackError, ToolOutput};
use harvest_core::{
    AcquisitionLog, FileLog, HarvestOptions, Harvester, HttpClient, NoDelay, RunMode, RunStats,
    SearchClient, SearchError,
};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;
use support::{result_block, results_page};

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Writes a PDF (or not) for every title and counts calls.
struct ScriptedTool {
    produce_pdf: bool,
    titles: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedTool {
    fn new(produce_pdf: bool) -> Arc<Self> {
        Arc::new(Self {
            produce_pdf,
            titles: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AcquisitionTool for ScriptedTool {
    fn label(&self) -> &str {
        "SciDownl"
    }

    async fn fetch(&self, title: &str, out: &Path) -> Result<ToolOutput, FallbackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.titles.lock().unwrap().push(title.to_string());
        if self.produce_pdf {
            std::fs::write(out, b"%PDF-1.4 from tool").unwrap();
            Ok(ToolOutput {
                exit_code: Some(0),
                ..ToolOutput::default()
            })
        } else {
            Ok(ToolOutput {
                exit_code: Some(1),
                stderr: "paper not found".to_string(),
                ..ToolOutput::default()
            })
        }
    }
}

fn harvester(server: &MockServer, output_dir: &Path, tool: Arc<ScriptedTool>) -> Harvester {
    Harvester::new(
        SearchClient::with_endpoint(&format!("{}/scholar", server.uri())).unwrap(),
        HttpClient::new().unwrap(),
        tool,
        Arc::new(NoDelay),
        output_dir,
    )
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(ToString::to_string)
        .collect()
}

/// Page 0 holds three records: a working link, a dead link, and no link.
async fn mount_mixed_page(server: &MockServer) {
    let page = results_page(&[
        result_block(
            "Graph Attention Networks",
            "P Velickovic, G Cucurull - arXiv preprint, 2017 - arxiv.org",
            Some(&format!("{}/pdf/gat.pdf", server.uri())),
        ),
        result_block(
            "Inductive Representation Learning",
            "W Hamilton - NeurIPS, 2017 - proceedings.neurips.cc",
            Some(&format!("{}/pdf/gone.pdf", server.uri())),
        ),
        result_block(
            "Spectral Networks",
            "J Bruna - ICLR, 2014 - openreview.net",
            None,
        ),
    ]);
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_request_carries_params_and_browser_user_agent() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("start", "20"))
        .and(query_param("q", "graph neural networks"))
        .and(query_param("hl", "en"))
        .and(query_param("as_sdt", "0,5"))
        .and(header("User-Agent", BROWSER_UA))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(&format!("{}/scholar", server.uri())).unwrap();
    let html = client.fetch_page("graph neural networks", 2).await.unwrap();

    assert_eq!(html, "<html></html>");
}

#[tokio::test]
async fn test_search_non_200_is_http_status_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(&format!("{}/scholar", server.uri())).unwrap();
    let result = client.fetch_page("q", 0).await;

    assert!(matches!(
        result,
        Err(SearchError::HttpStatus { status: 429, .. })
    ));
}

#[tokio::test]
async fn test_run_downloads_direct_links_and_falls_back_for_the_rest() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_mixed_page(&server).await;
    Mock::given(method("GET"))
        .and(path("/pdf/gat.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.5 gat"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdf/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let tool = ScriptedTool::new(true);
    let summary = harvester(&server, temp.path(), Arc::clone(&tool))
        .run(&HarvestOptions::new("graph networks", 1))
        .await
        .unwrap();

    assert_eq!(summary.folder, temp.path().join("graph networks PDFs"));
    assert_eq!(
        summary.stats,
        RunStats {
            pages_requested: 1,
            pages_failed: 0,
            records: 3,
            acquired: 1,
            via_tool: 2,
            already_present: 0,
            failed: 0,
        }
    );
    assert_eq!(
        read_lines(&summary.folder.join("literature.txt")),
        vec![
            format!(
                "Graph Attention Networks - P Velickovic, G Cucurull.pdf | {}/pdf/gat.pdf",
                server.uri()
            ),
            "Inductive Representation Learning - W Hamilton.pdf | SciDownl".to_string(),
            "Spectral Networks - J Bruna.pdf | SciDownl".to_string(),
        ]
    );
    assert!(read_lines(&summary.folder.join("literature_errors.txt")).is_empty());
    assert_eq!(
        *tool.titles.lock().unwrap(),
        vec![
            "Inductive Representation Learning".to_string(),
            "Spectral Networks".to_string()
        ]
    );
    assert!(
        summary
            .folder
            .join("Graph Attention Networks - P Velickovic, G Cucurull.pdf")
            .is_file()
    );
}

#[tokio::test]
async fn test_rerun_skips_everything_already_logged() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_mixed_page(&server).await;
    Mock::given(method("GET"))
        .and(path("/pdf/gat.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.5 gat"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdf/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let tool = ScriptedTool::new(true);
    let harvester = harvester(&server, temp.path(), Arc::clone(&tool));
    let options = HarvestOptions::new("graph networks", 1);

    harvester.run(&options).await.unwrap();
    let second = harvester.run(&options).await.unwrap();

    assert_eq!(second.stats.already_present, 3);
    assert_eq!(second.stats.acquired + second.stats.via_tool, 0);
    assert_eq!(tool.calls(), 2, "no tool runs on the second pass");
    assert_eq!(read_lines(&second.folder.join("literature.txt")).len(), 3);
}

#[tokio::test]
async fn test_fresh_run_truncates_logs_and_downloads_again() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_mixed_page(&server).await;
    Mock::given(method("GET"))
        .and(path("/pdf/gat.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.5 gat"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pdf/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let tool = ScriptedTool::new(true);
    let harvester = harvester(&server, temp.path(), Arc::clone(&tool));

    harvester
        .run(&HarvestOptions::new("graph networks", 1))
        .await
        .unwrap();
    let mut fresh = HarvestOptions::new("graph networks", 1);
    fresh.mode = RunMode::Fresh;
    let second = harvester.run(&fresh).await.unwrap();

    assert_eq!(second.stats.already_present, 0);
    assert_eq!(second.stats.acquired, 1);
    assert_eq!(read_lines(&second.folder.join("literature.txt")).len(), 3);
}

#[tokio::test]
async fn test_failed_page_is_skipped_and_later_pages_processed() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
            result_block("Late Result", "Z Author - Venue, 2021 - host", None),
        ])))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let summary = harvester(&server, temp.path(), ScriptedTool::new(true))
        .run(&HarvestOptions::new("q", 2))
        .await
        .unwrap();

    assert_eq!(summary.stats.pages_requested, 2);
    assert_eq!(summary.stats.pages_failed, 1);
    assert_eq!(summary.stats.records, 1);
    assert_eq!(summary.stats.via_tool, 1);
}

#[tokio::test]
async fn test_html_instead_of_pdf_is_deleted_and_failure_logged() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
            result_block(
                "Paywalled Paper",
                "Y Author - Journal, 2019 - publisher.com",
                Some(&format!("{}/landing", server.uri())),
            ),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sign in</html>"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let summary = harvester(&server, temp.path(), ScriptedTool::new(false))
        .run(&HarvestOptions::new("paywall", 1))
        .await
        .unwrap();

    assert_eq!(summary.stats.failed, 1);
    assert!(!summary.folder.join("Paywalled Paper - Y Author.pdf").exists());
    assert!(read_lines(&summary.folder.join("literature.txt")).is_empty());
    assert_eq!(
        read_lines(&summary.folder.join("literature_errors.txt")),
        vec!["Paywalled Paper | Y Author | SciDownl failed".to_string()]
    );
}

#[tokio::test]
async fn test_earlier_failure_replaced_when_record_later_succeeds() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
            result_block("Flaky Paper", "F Author - Venue, 2020 - host", None),
        ])))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let first = harvester(&server, temp.path(), ScriptedTool::new(false))
        .run(&HarvestOptions::new("flaky", 1))
        .await
        .unwrap();
    assert_eq!(
        read_lines(&first.folder.join("literature_errors.txt")).len(),
        1
    );

    let second = harvester(&server, temp.path(), ScriptedTool::new(true))
        .run(&HarvestOptions::new("flaky", 1))
        .await
        .unwrap();

    assert_eq!(second.stats.via_tool, 1);
    assert!(read_lines(&second.folder.join("literature_errors.txt")).is_empty());
    let log = FileLog::open(&second.folder).unwrap();
    assert!(log.exists("Flaky Paper - F Author.pdf").unwrap());
}
