//! Recording fakes for host services.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{
    Clipboard, ClipboardError, EditorContext, FileSystem, HostServices, Notifier, PathKind,
    ProcessHandle, Severity, ShellExecutor, SpawnError,
};

#[derive(Default)]
pub struct RecordingNotifier {
    pub notes: Mutex<Vec<(Severity, String)>>,
    pub prompts: Mutex<Vec<(String, Vec<String>)>>,
    /// Action the "user" picks when prompted.
    pub answer: Option<String>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<(Severity, String)> {
        self.notes.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<(String, Vec<String>)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.notes().iter().filter(|(s, _)| *s == severity).count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.notes
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }

    async fn prompt(&self, message: &str, actions: &[&str]) -> Option<String> {
        self.prompts.lock().unwrap().push((
            message.to_string(),
            actions.iter().map(|a| a.to_string()).collect(),
        ));
        self.answer.clone()
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct FixedEditor(pub Option<PathBuf>);

impl EditorContext for FixedEditor {
    fn active_document(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// In-memory filesystem; unknown paths fail with `NotFound`.
#[derive(Default)]
pub struct FakeFileSystem {
    pub entries: HashMap<PathBuf, PathKind>,
    pub stats: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl FileSystem for FakeFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<PathKind> {
        self.stats.lock().unwrap().push(path.to_path_buf());
        self.entries
            .get(path)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file or directory"))
    }
}

#[derive(Default)]
pub struct RecordingShell {
    pub spawned: Mutex<Vec<(String, Option<PathBuf>)>>,
    /// Error text to fail every spawn with.
    pub fail_with: Option<String>,
}

impl RecordingShell {
    pub fn spawned(&self) -> Vec<(String, Option<PathBuf>)> {
        self.spawned.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShellExecutor for RecordingShell {
    async fn spawn_detached(
        &self,
        command: &str,
        working_directory: Option<&Path>,
    ) -> Result<ProcessHandle, SpawnError> {
        if let Some(message) = &self.fail_with {
            return Err(SpawnError::Io {
                command: command.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, message.clone()),
            });
        }
        self.spawned
            .lock()
            .unwrap()
            .push((command.to_string(), working_directory.map(Path::to_path_buf)));
        Ok(ProcessHandle { pid: Some(4242) })
    }
}

/// Fakes wired into a [`HostServices`], with handles kept for assertions.
pub struct Harness {
    pub notifier: Arc<RecordingNotifier>,
    pub clipboard: Arc<RecordingClipboard>,
    pub fs: Arc<FakeFileSystem>,
    pub shell: Arc<RecordingShell>,
    pub services: HostServices,
}

#[derive(Default)]
pub struct HarnessBuilder {
    active: Option<PathBuf>,
    entries: HashMap<PathBuf, PathKind>,
    answer: Option<String>,
    spawn_error: Option<String>,
}

impl HarnessBuilder {
    pub fn active_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.active = Some(path.into());
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), PathKind::File);
        self
    }

    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), PathKind::Directory);
        self
    }

    pub fn answer(mut self, action: &str) -> Self {
        self.answer = Some(action.to_string());
        self
    }

    pub fn spawn_error(mut self, message: &str) -> Self {
        self.spawn_error = Some(message.to_string());
        self
    }

    pub fn build(self) -> Harness {
        let notifier = Arc::new(RecordingNotifier {
            answer: self.answer,
            ..Default::default()
        });
        let clipboard = Arc::new(RecordingClipboard::default());
        let fs = Arc::new(FakeFileSystem {
            entries: self.entries,
            ..Default::default()
        });
        let shell = Arc::new(RecordingShell {
            fail_with: self.spawn_error,
            ..Default::default()
        });
        let services = HostServices {
            editor: Arc::new(FixedEditor(self.active)),
            notifier: notifier.clone(),
            clipboard: clipboard.clone(),
            fs: fs.clone(),
            shell: shell.clone(),
        };
        Harness {
            notifier,
            clipboard,
            fs,
            shell,
            services,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }
}
