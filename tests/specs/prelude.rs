//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the vespa binary against throwaway
//! application packages and a single-request local HTTP server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Environment variables that would leak the caller's settings into a run.
const SCRUBBED_ENV: &[&str] = &[
    "NO_COLOR",
    "COLOR",
    "VESPA_CLI_CONFIG",
    "VESPA_CLI_TARGET",
    "VESPA_LOG",
];

/// Returns a Command configured to run the vespa binary
pub fn vespa_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vespa"));
    for var in SCRUBBED_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a deploy command builder for the package at `path`
pub fn deploy(path: impl AsRef<Path>) -> DeployBuilder {
    DeployBuilder {
        path: path.as_ref().to_path_buf(),
        args: Vec::new(),
        envs: Vec::new(),
        dir: None,
    }
}

/// Fluent builder for `vespa deploy` runs
pub struct DeployBuilder {
    path: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    dir: Option<PathBuf>,
}

#[allow(dead_code)]
impl DeployBuilder {
    /// Pass `-t <target>`
    pub fn target(mut self, target: &str) -> Self {
        self.args.push("-t".to_string());
        self.args.push(target.to_string());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }

    fn command(self) -> Command {
        let mut cmd = vespa_cmd();
        cmd.arg("deploy").arg(&self.path).args(&self.args);
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a finished run
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        let pred = predicate.into_predicate();
        assert!(pred.eval(&stderr), "stderr does not match predicate\nstderr: {stderr}");
        self
    }
}

/// Temporary application package directory
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty directory marked as a git root, so config discovery
    /// never leaves it.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Create a minimal application package.
    pub fn application() -> Self {
        let temp = Self::empty();
        temp.file(
            "app/services.xml",
            "<services version=\"1.0\">\n  <container id=\"default\" version=\"1.0\"/>\n</services>\n",
        );
        temp.file(
            "app/schemas/music.sd",
            "schema music {\n  document music {\n    field title type string {}\n  }\n}\n",
        );
        temp
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the application directory created by [`Project::application`].
    pub fn app(&self) -> PathBuf {
        self.path().join("app")
    }

    /// Write `vespa.toml` at the project root.
    pub fn config(&self, content: &str) {
        self.file("vespa.toml", content);
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, path: &str, content: &str) {
        self.bytes(path, content.as_bytes());
    }

    pub fn bytes(&self, path: &str, content: &[u8]) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }
}

/// Request received by a [`serve_once`] server.
pub struct CapturedRequest {
    /// Request line and headers.
    pub head: String,
    pub body: Vec<u8>,
}

/// Single-request HTTP server on a random local port.
pub struct OneShotServer {
    pub url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl OneShotServer {
    /// Waits for the request to be served and returns it.
    pub fn request(self) -> CapturedRequest {
        self.handle.join().unwrap()
    }
}

/// Serve exactly one request, answering with `status` and `body`.
pub fn serve_once(status: u16, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        let length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let mut request_body = vec![0; length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            head,
            body: request_body,
        }
    });

    OneShotServer { url, handle }
}

/// URL of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
