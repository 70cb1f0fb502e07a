//! Shared fixtures for runtime integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use rfinstall_core::{CredentialSource, InstallConfig, LogSinkPort, ScriptSource};
use rfinstall_runtime::{
    CommandLine, CommandRunnerPort, DependencyProbePort, ProcessCommandRunner, RunnerError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Local HTTP server handing out an installer script.
pub struct ScriptServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl ScriptServer {
    /// URL that answers 200 with the script body.
    pub fn script_url(&self) -> String {
        format!("http://{}/cli/", self.addr)
    }

    /// URL that answers 404.
    pub fn missing_url(&self) -> String {
        format!("http://{}/missing/", self.addr)
    }

    /// Number of requests received on any route.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn serve_script(body: &'static str) -> ScriptServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let script_hits = Arc::clone(&hits);
    let missing_hits = Arc::clone(&hits);

    let app = Router::new()
        .route(
            "/cli/",
            get(move || {
                let hits = Arc::clone(&script_hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    body
                }
            }),
        )
        .route(
            "/missing/",
            get(move || {
                let hits = Arc::clone(&missing_hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::NOT_FOUND, "not found")
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ScriptServer { addr, hits }
}

/// Probe that reports a fixed answer for every tool.
pub struct FakeProbe {
    pub present: bool,
}

impl DependencyProbePort for FakeProbe {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        self.present.then(|| PathBuf::from(format!("/usr/bin/{tool}")))
    }
}

/// Serves one connection: a 200 header promising 1000 bytes, a short body,
/// then a closed socket.
pub async fn serve_truncated_body() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n#!/bin/sh\necho hi\n")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    addr
}

/// What a [`RecordingRunner`] does after recording a command.
enum Mode {
    /// Run it for real.
    Passthrough,
    /// Report success without spawning.
    Succeed,
    /// Report a non-zero exit for commands starting with the prefix,
    /// success for everything else.
    FailOn(&'static str),
}

/// Runner that records every rendered command line.
pub struct RecordingRunner {
    mode: Mode,
    inner: ProcessCommandRunner,
    commands: Mutex<Vec<String>>,
}

impl RecordingRunner {
    fn with_mode(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            inner: ProcessCommandRunner::new(),
            commands: Mutex::new(Vec::new()),
        })
    }

    pub fn passthrough() -> Arc<Self> {
        Self::with_mode(Mode::Passthrough)
    }

    pub fn succeeding() -> Arc<Self> {
        Self::with_mode(Mode::Succeed)
    }

    pub fn failing_on(prefix: &'static str) -> Arc<Self> {
        Self::with_mode(Mode::FailOn(prefix))
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunnerPort for RecordingRunner {
    async fn run(
        &self,
        command: &CommandLine,
        sink: &dyn LogSinkPort,
    ) -> Result<bool, RunnerError> {
        let rendered = command.to_string();
        self.commands.lock().unwrap().push(rendered.clone());
        match self.mode {
            Mode::Passthrough => self.inner.run(command, sink).await,
            Mode::Succeed => Ok(true),
            Mode::FailOn(prefix) => Ok(!rendered.starts_with(prefix)),
        }
    }
}

/// Config downloading from `url` with login disabled.
pub fn url_config(url: String) -> InstallConfig {
    InstallConfig {
        script_source: ScriptSource::Url { url },
        credentials: CredentialSource::None,
        ..InstallConfig::default()
    }
}
