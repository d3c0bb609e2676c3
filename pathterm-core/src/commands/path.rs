//! Get-path command: show the path of a file or folder and copy it.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{report_failure, resolve_target, CommandId, DispatchError, Feature, InvocationSource, PathRef};
use crate::config::ExtensionConfig;
use crate::host::{HostServices, PathKind, Severity};

/// Action offered when the path is not copied automatically.
pub const COPY_ACTION: &str = "Copy";

/// Outcome of a successful get-path invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    pub path: PathBuf,
    pub kind: PathKind,
    pub source: InvocationSource,
    /// Message shown to the user.
    pub message: String,
    /// Whether the path ended up on the clipboard.
    pub copied: bool,
}

/// Build the message shown for `path`.
///
/// The lead-in depends on how the command was reached; the glyph on
/// `show_icons` and the kind of path.
pub fn format_path_message(
    path: &Path,
    kind: PathKind,
    source: InvocationSource,
    show_icons: bool,
) -> String {
    let icon = match (show_icons, kind) {
        (false, _) => "",
        (true, PathKind::File) => "📄 ",
        (true, PathKind::Directory) => "📁 ",
    };
    let lead = match source {
        InvocationSource::ContextMenu => "Selected",
        InvocationSource::CommandPalette => "Current",
    };
    format!("{icon}{lead} {} path: {}", kind.noun(), path.display())
}

/// Run the get-path command.
///
/// Failures are shown to the user before being returned.
pub async fn get_current_path(
    services: &HostServices,
    config: &ExtensionConfig,
    target: Option<PathRef>,
) -> Result<PathReport, DispatchError> {
    let result = run(services, config, target).await;
    if let Err(err) = &result {
        report_failure(services.notifier.as_ref(), CommandId::GetCurrentPath, err);
    }
    result
}

async fn run(
    services: &HostServices,
    config: &ExtensionConfig,
    target: Option<PathRef>,
) -> Result<PathReport, DispatchError> {
    if !config.get_path_enabled {
        return Err(DispatchError::FeatureDisabled(Feature::GetPath));
    }

    let (path, source) = resolve_target(target, services.editor.as_ref())?;

    // The active document is always a file; only explicit targets are stat'ed.
    let kind = match source {
        InvocationSource::ContextMenu => services
            .fs
            .stat(&path)
            .await
            .map_err(|source| DispatchError::Inspect {
                path: path.clone(),
                source,
            })?,
        InvocationSource::CommandPalette => PathKind::File,
    };
    debug!(path = %path.display(), ?kind, ?source, "Resolved path");

    let message = format_path_message(&path, kind, source, config.show_icons);
    let text = path.display().to_string();

    let copied = if config.auto_clipboard {
        services.clipboard.write_text(&text)?;
        services
            .notifier
            .notify(Severity::Info, &format!("{message} (copied to clipboard)"));
        true
    } else {
        match services.notifier.prompt(&message, &[COPY_ACTION]).await {
            Some(choice) if choice == COPY_ACTION => {
                services.clipboard.write_text(&text)?;
                services
                    .notifier
                    .notify(Severity::Info, "Path copied to clipboard");
                true
            }
            _ => false,
        }
    };
    info!(path = %text, copied, "Path reported");

    Ok(PathReport {
        path,
        kind,
        source,
        message,
        copied,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::Harness;

    fn config() -> ExtensionConfig {
        ExtensionConfig::default()
    }

    // -------------------------------------------------------------------------
    // Message Formatting
    // -------------------------------------------------------------------------

    #[test]
    fn test_message_varies_by_icon_kind_and_source() {
        let path = Path::new("/work/src");

        assert_eq!(
            format_path_message(path, PathKind::Directory, InvocationSource::ContextMenu, true),
            "📁 Selected folder path: /work/src"
        );
        assert_eq!(
            format_path_message(path, PathKind::File, InvocationSource::CommandPalette, true),
            "📄 Current file path: /work/src"
        );
        assert_eq!(
            format_path_message(path, PathKind::File, InvocationSource::ContextMenu, false),
            "Selected file path: /work/src"
        );
    }

    // -------------------------------------------------------------------------
    // Preconditions
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_disabled_feature_warns_and_does_nothing() {
        let harness = Harness::builder()
            .file("/work/main.rs")
            .active_document("/work/main.rs")
            .build();
        let mut config = config();
        config.get_path_enabled = false;
        config.auto_clipboard = true;

        for target in [Some(PathRef::new("/work/main.rs")), None] {
            let err = get_current_path(&harness.services, &config, target)
                .await
                .unwrap_err();
            assert!(matches!(err, DispatchError::FeatureDisabled(Feature::GetPath)));
        }

        assert!(harness.clipboard.writes().is_empty());
        assert!(harness.notifier.prompts().is_empty());
        assert_eq!(harness.notifier.count(Severity::Warning), 2);
        assert!(harness.fs.stats.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_target_warns() {
        let harness = Harness::builder().build();

        let err = get_current_path(&harness.services, &config(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::NoTarget));
        assert_eq!(harness.notifier.count(Severity::Warning), 1);
        assert!(harness.clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn test_inaccessible_target_reports_error() {
        let harness = Harness::builder().build();

        let err = get_current_path(&harness.services, &config(), Some(PathRef::new("/gone")))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Inspect { .. }));
        let notes = harness.notifier.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, Severity::Error);
        assert!(notes[0].1.contains("/gone"));
        assert!(harness.notifier.prompts().is_empty());
    }

    // -------------------------------------------------------------------------
    // Clipboard Modes
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_auto_clipboard_copies_with_single_confirmation() {
        let harness = Harness::builder().file("/work/main.rs").build();
        let mut config = config();
        config.auto_clipboard = true;

        let report = get_current_path(
            &harness.services,
            &config,
            Some(PathRef::new("/work/main.rs")),
        )
        .await
        .unwrap();

        assert!(report.copied);
        assert_eq!(report.kind, PathKind::File);
        assert_eq!(harness.clipboard.writes(), vec!["/work/main.rs".to_string()]);
        assert!(harness.notifier.prompts().is_empty());
        let notes = harness.notifier.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, Severity::Info);
        assert!(notes[0].1.contains("copied to clipboard"));
    }

    #[tokio::test]
    async fn test_prompt_offers_copy_and_copies_once_when_chosen() {
        let harness = Harness::builder()
            .dir("/work/src")
            .answer(COPY_ACTION)
            .build();

        let report = get_current_path(&harness.services, &config(), Some(PathRef::new("/work/src")))
            .await
            .unwrap();

        let prompts = harness.notifier.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, "📁 Selected folder path: /work/src");
        assert_eq!(prompts[0].1, vec![COPY_ACTION.to_string()]);
        assert_eq!(harness.clipboard.writes(), vec!["/work/src".to_string()]);
        assert!(report.copied);
    }

    #[tokio::test]
    async fn test_prompt_dismissed_copies_nothing() {
        let harness = Harness::builder().file("/work/main.rs").build();

        let report = get_current_path(
            &harness.services,
            &config(),
            Some(PathRef::new("/work/main.rs")),
        )
        .await
        .unwrap();

        assert_eq!(harness.notifier.prompts().len(), 1);
        assert!(harness.clipboard.writes().is_empty());
        assert!(!report.copied);
    }

    // -------------------------------------------------------------------------
    // Active Document
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_active_document_is_a_file_without_stat() {
        // Not registered with the fake filesystem: a stat would fail.
        let harness = Harness::builder()
            .active_document("/work/lib.rs")
            .build();
        let mut config = config();
        config.show_icons = false;

        let report = get_current_path(&harness.services, &config, None)
            .await
            .unwrap();

        assert_eq!(report.kind, PathKind::File);
        assert_eq!(report.source, InvocationSource::CommandPalette);
        assert_eq!(report.message, "Current file path: /work/lib.rs");
        assert!(harness.fs.stats.lock().unwrap().is_empty());
    }
}
