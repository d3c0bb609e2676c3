//! Open-terminal command: launch an external terminal at a folder.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{report_failure, resolve_target, CommandId, DispatchError, Feature, PathRef};
use crate::config::{keys, ExtensionConfig, LinuxTerminal, TerminalPreferences, WindowsTerminal};
use crate::host::{HostServices, PathKind, Platform, ProcessHandle, Severity};

/// Outcome of a successful terminal launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLaunch {
    /// Directory the terminal was opened in.
    pub directory: PathBuf,
    /// Shell command that was spawned.
    pub command: String,
    pub handle: ProcessHandle,
}

/// Build the shell command that opens a terminal in `dir`.
///
/// On macOS and Linux the directory is single-quoted for `sh`, so `$`,
/// backticks and quotes in folder names stay literal. A custom template is
/// used as written.
pub fn build_terminal_command(
    platform: Platform,
    prefs: &TerminalPreferences,
    dir: &Path,
) -> Result<String, DispatchError> {
    let dir = dir.display();
    let command = match platform {
        Platform::Windows => {
            let wt = format!(r#"wt -d "{dir}""#);
            let cmd = format!(r#"start cmd /k "cd /d "{dir}"""#);
            match prefs.windows {
                Some(WindowsTerminal::Wt) => wt,
                Some(WindowsTerminal::Cmd) => cmd,
                Some(WindowsTerminal::PowerShell) => format!(
                    r#"start powershell -NoExit -Command "Set-Location -LiteralPath '{dir}'""#
                ),
                None => format!("{wt} || {cmd}"),
            }
        }
        Platform::MacOs => format!("open -a Terminal {}", shell_quote(&dir.to_string())),
        Platform::Linux => {
            let quoted = shell_quote(&dir.to_string());
            let gnome = format!("gnome-terminal --working-directory={quoted}");
            let xterm = format!("xterm -e {}", shell_quote(&format!("cd {quoted} && bash")));
            let konsole = format!("konsole --workdir {quoted}");
            match prefs.linux {
                Some(LinuxTerminal::GnomeTerminal) => gnome,
                Some(LinuxTerminal::Xterm) => xterm,
                Some(LinuxTerminal::Konsole) => konsole,
                Some(LinuxTerminal::Custom) => {
                    if prefs.custom_command.trim().is_empty() {
                        return Err(DispatchError::MissingCustomCommand);
                    }
                    prefs
                        .custom_command
                        .replace(keys::PATH_PLACEHOLDER, &dir.to_string())
                }
                None => format!("{gnome} || {konsole} || {xterm}"),
            }
        }
    };
    Ok(command)
}

/// Run the open-terminal command on `platform`.
///
/// Failures are shown to the user before being returned.
pub async fn open_in_external_terminal(
    services: &HostServices,
    config: &ExtensionConfig,
    platform: Platform,
    target: Option<PathRef>,
) -> Result<TerminalLaunch, DispatchError> {
    let result = run(services, config, platform, target).await;
    if let Err(err) = &result {
        report_failure(
            services.notifier.as_ref(),
            CommandId::OpenInExternalTerminal,
            err,
        );
    }
    result
}

async fn run(
    services: &HostServices,
    config: &ExtensionConfig,
    platform: Platform,
    target: Option<PathRef>,
) -> Result<TerminalLaunch, DispatchError> {
    if !config.open_terminal_enabled {
        return Err(DispatchError::FeatureDisabled(Feature::OpenTerminal));
    }

    let (path, _) = resolve_target(target, services.editor.as_ref())?;
    let kind = services
        .fs
        .stat(&path)
        .await
        .map_err(|source| DispatchError::Inspect {
            path: path.clone(),
            source,
        })?;
    let directory = match kind {
        PathKind::Directory => path,
        PathKind::File => parent_dir(&path),
    };

    let command = build_terminal_command(platform, &config.terminal, &directory)?;
    debug!(%platform, %command, "Terminal command built");

    let handle = services
        .shell
        .spawn_detached(&command, Some(&directory))
        .await?;
    info!(directory = %directory.display(), pid = ?handle.pid, "Terminal opened");
    services.notifier.notify(
        Severity::Info,
        &format!("Opened terminal in: {}", directory.display()),
    );

    Ok(TerminalLaunch {
        directory,
        command,
        handle,
    })
}

/// Quote `s` as a single POSIX shell word.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Parent of a file; a bare file name resolves to the current directory.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::Harness;

    fn prefs(windows: Option<WindowsTerminal>, linux: Option<LinuxTerminal>) -> TerminalPreferences {
        TerminalPreferences {
            windows,
            linux,
            custom_command: String::new(),
        }
    }

    fn config_with(prefs: TerminalPreferences) -> ExtensionConfig {
        ExtensionConfig {
            terminal: prefs,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Command Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_windows_commands() {
        let dir = Path::new("/work");
        let build = |choice| build_terminal_command(Platform::Windows, &prefs(choice, None), dir).unwrap();

        assert_eq!(build(Some(WindowsTerminal::Wt)), r#"wt -d "/work""#);
        assert_eq!(build(Some(WindowsTerminal::Cmd)), r#"start cmd /k "cd /d "/work"""#);
        assert_eq!(
            build(Some(WindowsTerminal::PowerShell)),
            r#"start powershell -NoExit -Command "Set-Location -LiteralPath '/work'""#
        );
        assert_eq!(
            build(None),
            r#"wt -d "/work" || start cmd /k "cd /d "/work"""#
        );
    }

    #[test]
    fn test_macos_ignores_preferences() {
        let dir = Path::new("/Users/me/work");
        for linux in [None, Some(LinuxTerminal::Custom)] {
            assert_eq!(
                build_terminal_command(Platform::MacOs, &prefs(None, linux), dir).unwrap(),
                "open -a Terminal '/Users/me/work'"
            );
        }
    }

    #[test]
    fn test_linux_commands() {
        let dir = Path::new("/home/me/work");
        let build = |choice| build_terminal_command(Platform::Linux, &prefs(None, choice), dir).unwrap();

        assert_eq!(
            build(Some(LinuxTerminal::GnomeTerminal)),
            "gnome-terminal --working-directory='/home/me/work'"
        );
        assert_eq!(
            build(Some(LinuxTerminal::Xterm)),
            r"xterm -e 'cd '\''/home/me/work'\'' && bash'"
        );
        assert_eq!(
            build(Some(LinuxTerminal::Konsole)),
            "konsole --workdir '/home/me/work'"
        );
        assert_eq!(
            build(None),
            concat!(
                "gnome-terminal --working-directory='/home/me/work' || ",
                "konsole --workdir '/home/me/work' || ",
                r"xterm -e 'cd '\''/home/me/work'\'' && bash'"
            )
        );
    }

    #[test]
    fn test_shell_quote_keeps_metacharacters_literal() {
        assert_eq!(shell_quote("/tmp/my dir"), "'/tmp/my dir'");
        assert_eq!(shell_quote("/tmp/$HOME`id`"), "'/tmp/$HOME`id`'");
        assert_eq!(shell_quote(r#"/tmp/say "hi""#), r#"'/tmp/say "hi"'"#);
        assert_eq!(shell_quote("/tmp/it's"), r"'/tmp/it'\''s'");
    }

    #[test]
    fn test_hostile_folder_names_are_quoted() {
        let dir = Path::new("/tmp/proj $(touch pwned) `id` \"x\" it's");
        let quoted = r#"'/tmp/proj $(touch pwned) `id` "x" it'\''s'"#;

        let konsole =
            build_terminal_command(Platform::Linux, &prefs(None, Some(LinuxTerminal::Konsole)), dir)
                .unwrap();
        assert_eq!(konsole, format!("konsole --workdir {quoted}"));

        let gnome = build_terminal_command(
            Platform::Linux,
            &prefs(None, Some(LinuxTerminal::GnomeTerminal)),
            dir,
        )
        .unwrap();
        assert_eq!(gnome, format!("gnome-terminal --working-directory={quoted}"));

        let mac = build_terminal_command(Platform::MacOs, &prefs(None, None), dir).unwrap();
        assert_eq!(mac, format!("open -a Terminal {quoted}"));

        let xterm =
            build_terminal_command(Platform::Linux, &prefs(None, Some(LinuxTerminal::Xterm)), dir)
                .unwrap();
        assert_eq!(xterm, format!("xterm -e {}", shell_quote(&format!("cd {quoted} && bash"))));
        assert!(!xterm.contains(r#"-e "cd"#));
    }

    #[cfg(unix)]
    #[test]
    fn test_quoted_directory_survives_the_shell() {
        let dir = "/tmp/proj $(echo injected) `echo injected` \"x\" it's";
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("printf %s {}", shell_quote(dir)))
            .output()
            .unwrap();

        assert_eq!(String::from_utf8(output.stdout).unwrap(), dir);
    }

    #[test]
    fn test_custom_template_replaces_every_placeholder() {
        let mut prefs = prefs(None, Some(LinuxTerminal::Custom));
        prefs.custom_command = "kitty --directory {path} --title {path}".to_string();

        let command = build_terminal_command(Platform::Linux, &prefs, Path::new("/srv")).unwrap();

        assert_eq!(command, "kitty --directory /srv --title /srv");
    }

    #[test]
    fn test_blank_custom_template_is_missing_configuration() {
        let mut prefs = prefs(None, Some(LinuxTerminal::Custom));
        prefs.custom_command = "   ".to_string();

        assert!(matches!(
            build_terminal_command(Platform::Linux, &prefs, Path::new("/srv")),
            Err(DispatchError::MissingCustomCommand)
        ));
    }

    #[test]
    fn test_parent_dir_of_bare_name_is_current_dir() {
        assert_eq!(parent_dir(Path::new("notes.txt")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("/work/notes.txt")), PathBuf::from("/work"));
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_file_context_opens_parent_directory() {
        let harness = Harness::builder().file("/work/main.rs").build();
        let config = config_with(prefs(Some(WindowsTerminal::Cmd), None));

        let launch = open_in_external_terminal(
            &harness.services,
            &config,
            Platform::Windows,
            Some(PathRef::new("/work/main.rs")),
        )
        .await
        .unwrap();

        assert_eq!(launch.directory, PathBuf::from("/work"));
        assert_eq!(launch.command, r#"start cmd /k "cd /d "/work"""#);
        assert_eq!(launch.handle.pid, Some(4242));
        assert_eq!(
            harness.shell.spawned(),
            vec![(launch.command.clone(), Some(PathBuf::from("/work")))]
        );
        assert_eq!(
            harness.notifier.notes(),
            vec![(Severity::Info, "Opened terminal in: /work".to_string())]
        );
    }

    #[tokio::test]
    async fn test_directory_context_opens_directory_itself() {
        let harness = Harness::builder().dir("/work/src").build();
        let config = config_with(prefs(None, Some(LinuxTerminal::Konsole)));

        let launch = open_in_external_terminal(
            &harness.services,
            &config,
            Platform::Linux,
            Some(PathRef::new("/work/src")),
        )
        .await
        .unwrap();

        assert_eq!(launch.directory, PathBuf::from("/work/src"));
        assert_eq!(launch.command, "konsole --workdir '/work/src'");
    }

    #[tokio::test]
    async fn test_active_document_is_stat_and_resolved() {
        let harness = Harness::builder()
            .file("/work/lib.rs")
            .active_document("/work/lib.rs")
            .build();

        let launch = open_in_external_terminal(
            &harness.services,
            &ExtensionConfig::default(),
            Platform::MacOs,
            None,
        )
        .await
        .unwrap();

        assert_eq!(launch.directory, PathBuf::from("/work"));
        assert_eq!(
            *harness.fs.stats.lock().unwrap(),
            vec![PathBuf::from("/work/lib.rs")]
        );
    }

    #[tokio::test]
    async fn test_disabled_feature_warns_on_every_platform() {
        let harness = Harness::builder()
            .file("/work/main.rs")
            .active_document("/work/main.rs")
            .build();
        let config = ExtensionConfig {
            open_terminal_enabled: false,
            ..Default::default()
        };

        for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            for target in [Some(PathRef::new("/work/main.rs")), None] {
                let err = open_in_external_terminal(&harness.services, &config, platform, target)
                    .await
                    .unwrap_err();
                assert!(matches!(err, DispatchError::FeatureDisabled(Feature::OpenTerminal)));
            }
        }

        assert_eq!(harness.notifier.count(Severity::Warning), 6);
        assert!(harness.shell.spawned().is_empty());
    }

    #[tokio::test]
    async fn test_custom_without_template_does_not_spawn() {
        let harness = Harness::builder().dir("/work").build();
        let config = config_with(prefs(None, Some(LinuxTerminal::Custom)));

        let err = open_in_external_terminal(
            &harness.services,
            &config,
            Platform::Linux,
            Some(PathRef::new("/work")),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DispatchError::MissingCustomCommand));
        assert!(harness.shell.spawned().is_empty());
        assert_eq!(harness.notifier.count(Severity::Error), 1);
    }

    #[tokio::test]
    async fn test_inaccessible_target_does_not_spawn() {
        let harness = Harness::builder().build();

        let err = open_in_external_terminal(
            &harness.services,
            &ExtensionConfig::default(),
            Platform::Linux,
            Some(PathRef::new("/gone")),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DispatchError::Inspect { .. }));
        assert!(harness.shell.spawned().is_empty());
        assert_eq!(harness.notifier.count(Severity::Error), 1);
    }

    #[tokio::test]
    async fn test_spawn_failure_reports_underlying_error() {
        let harness = Harness::builder()
            .dir("/work")
            .spawn_error("konsole: not found")
            .build();

        let err = open_in_external_terminal(
            &harness.services,
            &ExtensionConfig::default(),
            Platform::Linux,
            Some(PathRef::new("/work")),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DispatchError::Spawn(_)));
        let notes = harness.notifier.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, Severity::Error);
        assert!(notes[0].1.starts_with("Failed to open terminal:"));
        assert!(notes[0].1.contains("konsole: not found"));
    }
}
