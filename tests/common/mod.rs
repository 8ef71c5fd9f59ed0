use std::path::PathBuf;

use synthetic_check::configuration::Settings;
use synthetic_check::health::{HealthCollector, HttpBackendClient};

pub struct TestBackend {
    pub server: mockito::ServerGuard,
    pub dir: tempfile::TempDir,
}

impl TestBackend {
    pub fn start() -> Self {
        Self {
            server: mockito::Server::new(),
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("metrics").join("system_health.prom")
    }

    pub fn settings(&self) -> Settings {
        Settings::new(&self.server.url(), self.output_path())
    }

    pub fn collector(&self) -> HealthCollector<HttpBackendClient> {
        HealthCollector::from_settings(&self.settings()).expect("Failed to build collector")
    }

    pub fn mock_probe(&mut self, path: &str, status: usize, body: &str) -> mockito::Mock {
        self.server
            .mock("GET", path)
            .match_header("accept", "application/json")
            .match_header("user-agent", "synthetic-check/1")
            .with_status(status)
            .with_body(body)
            .create()
    }

    /// Run the collector once and return `(timestamp, file contents)`.
    pub fn run(&self) -> (i64, String) {
        let timestamp = self.collector().run().expect("Collector run failed");
        let text = std::fs::read_to_string(self.output_path()).expect("Metrics file missing");
        (timestamp, text)
    }
}

/// A local URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Every sample line must follow its family's `# HELP` and `# TYPE` lines.
pub fn assert_valid_exposition(text: &str) {
    assert!(text.ends_with('\n'), "missing trailing newline");
    assert!(!text.ends_with("\n\n"), "more than one trailing newline");

    let mut help: Option<String> = None;
    let mut typed: Option<String> = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("# HELP ") {
            help = rest.split_whitespace().next().map(str::to_string);
            typed = None;
        } else if let Some(rest) = line.strip_prefix("# TYPE ") {
            let mut parts = rest.split_whitespace();
            let name = parts.next().map(str::to_string);
            assert_eq!(name, help, "TYPE without matching HELP: {line}");
            assert_eq!(parts.next(), Some("gauge"));
            typed = name;
        } else {
            let name = line
                .split(|c| c == '{' || c == ' ')
                .next()
                .unwrap_or_default();
            assert_eq!(typed.as_deref(), Some(name), "sample without HELP/TYPE: {line}");
        }
    }
}
