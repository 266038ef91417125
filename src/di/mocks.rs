//! Mock implementations of service traits for testing

use crate::core::{CobbleError, CobbleResult};
use crate::deploy::{CommandOutput, CommandRunner};
use crate::manifest::ReleaseManifest;
use crate::update::ReleaseSource;
use crate::workflow::{Phase, Status, StatusReporter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Release source serving a fixed manifest and archive
///
/// # Example
///
/// ```
/// use cobble::di::mocks::MockReleaseSource;
///
/// let source = MockReleaseSource::offline();
/// assert!(source.downloads().is_empty());
/// ```
pub struct MockReleaseSource {
    manifest: Option<ReleaseManifest>,
    archive: Vec<u8>,
    downloads: Mutex<Vec<String>>,
}

impl MockReleaseSource {
    pub fn new(manifest: ReleaseManifest, archive: Vec<u8>) -> Self {
        Self {
            manifest: Some(manifest),
            archive,
            downloads: Mutex::new(Vec::new()),
        }
    }

    /// A source whose every request fails, as if the network were down
    pub fn offline() -> Self {
        Self {
            manifest: None,
            archive: Vec::new(),
            downloads: Mutex::new(Vec::new()),
        }
    }

    /// URLs downloaded so far
    pub fn downloads(&self) -> Vec<String> {
        self.downloads
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReleaseSource for MockReleaseSource {
    async fn fetch_manifest(&self) -> CobbleResult<ReleaseManifest> {
        self.manifest
            .clone()
            .ok_or_else(|| CobbleError::Manifest("release server unreachable".to_string()))
    }

    async fn download(&self, url: &str, dest: &Path) -> CobbleResult<u64> {
        if self.manifest.is_none() {
            return Err(CobbleError::Manifest("release server unreachable".to_string()));
        }
        if let Ok(mut downloads) = self.downloads.lock() {
            downloads.push(url.to_string());
        }
        std::fs::write(dest, &self.archive)?;
        Ok(self.archive.len() as u64)
    }
}

/// Command runner answering each deployment subcommand with a canned output
///
/// Unscripted subcommands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    outputs: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `subcommand` (e.g. "devices") with `output`
    pub fn with(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.outputs.insert(subcommand.to_string(), output);
        self
    }

    /// Argument lists of every invocation so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Subcommands invoked so far, in order
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|args| args.first().cloned())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, _program: &Path, args: &[String]) -> CobbleResult<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(args.to_vec());
        }
        let subcommand = args.first().map(String::as_str).unwrap_or_default();
        Ok(self
            .outputs
            .get(subcommand)
            .cloned()
            .unwrap_or_else(|| CommandOutput::new(Some(0), "")))
    }
}

/// Status reporter that records everything it is told
#[derive(Default)]
pub struct MockStatusReporter {
    statuses: Mutex<Vec<Status>>,
}

impl MockStatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.statuses.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.statuses().into_iter().map(|s| s.phase).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.statuses().into_iter().map(|s| s.message).collect()
    }
}

impl StatusReporter for MockStatusReporter {
    fn report(&self, status: &Status) {
        if let Ok(mut statuses) = self.statuses.lock() {
            statuses.push(status.clone());
        }
    }
}
