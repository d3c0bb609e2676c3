//! The PathTerm add-on as seen by its host.
//!
//! [`Extension`] owns the configuration store and the settings view, and
//! hands out dispatch futures that carry their own configuration snapshot.
//! The store never leaves the thread that owns the extension; the futures
//! only hold [`HostServices`] and can be spawned onto any runtime.

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{info, warn};

use crate::commands::{
    self, DispatchError, Invocation, PathRef, PathReport, TerminalLaunch,
};
use crate::config::{ConfigStore, ExtensionConfig};
use crate::host::{HostServices, Platform};
use crate::view::{Setting, SettingsError, SettingsView};

/// Result of [`Extension::execute`].
pub enum Execution {
    /// The command finished synchronously.
    Done,
    /// The command continues asynchronously; spawn or await it.
    Pending(BoxFuture<'static, ()>),
}

impl Execution {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl std::fmt::Debug for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done => write!(f, "Done"),
            Self::Pending(_) => write!(f, "Pending(..)"),
        }
    }
}

/// Settings view and command dispatchers bound to one store.
pub struct Extension<S: ConfigStore> {
    store: S,
    view: SettingsView,
    services: HostServices,
    platform: Platform,
}

impl<S: ConfigStore> Extension<S> {
    /// Create the extension for the platform it is running on.
    pub fn new(store: S, services: HostServices) -> Self {
        Self::with_platform(store, services, Platform::current())
    }

    pub fn with_platform(store: S, services: HostServices, platform: Platform) -> Self {
        info!(%platform, "PathTerm activated");
        let view = SettingsView::new(services.notifier.clone());
        Self {
            store,
            view,
            services,
            platform,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &SettingsView {
        &self.view
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> ExtensionConfig {
        ExtensionConfig::load(&self.store)
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    pub fn list_settings(&self) -> Vec<Setting> {
        self.view.list_settings(&self.store)
    }

    pub fn toggle(&self, key: &str) -> Result<bool, SettingsError> {
        self.view.toggle(&self.store, key)
    }

    pub fn select(&self, key: &str, option: &str) -> Result<(), SettingsError> {
        self.view.select(&self.store, key, option)
    }

    pub fn set_custom_command(&self, template: &str) -> Result<(), SettingsError> {
        self.view.set_custom_command(&self.store, template)
    }

    pub fn refresh(&self) {
        self.view.refresh();
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Get-path command with the configuration as of now.
    pub fn get_current_path(
        &self,
        target: Option<PathRef>,
    ) -> BoxFuture<'static, Result<PathReport, DispatchError>> {
        let services = self.services.clone();
        let config = self.config();
        async move { commands::get_current_path(&services, &config, target).await }.boxed()
    }

    /// Open-terminal command with the configuration as of now.
    pub fn open_in_external_terminal(
        &self,
        target: Option<PathRef>,
    ) -> BoxFuture<'static, Result<TerminalLaunch, DispatchError>> {
        let services = self.services.clone();
        let config = self.config();
        let platform = self.platform;
        async move {
            commands::open_in_external_terminal(&services, &config, platform, target).await
        }
        .boxed()
    }

    /// Run a command by invocation.
    ///
    /// Dispatch failures have already been shown to the user when the
    /// pending future completes, so its output is discarded.
    pub fn execute(&self, invocation: Invocation) -> Execution {
        info!(command = %invocation.id(), "Executing command");
        match invocation {
            Invocation::RefreshSettingsView => {
                self.refresh();
                Execution::Done
            }
            Invocation::ToggleFeature(key) => {
                if let Err(err) = self.toggle(&key) {
                    warn!(key = %key, error = %err, "Toggle ignored");
                }
                Execution::Done
            }
            Invocation::GetCurrentPath(target) => {
                Execution::Pending(self.get_current_path(target).map(drop).boxed())
            }
            Invocation::OpenInExternalTerminal(target) => {
                Execution::Pending(self.open_in_external_terminal(target).map(drop).boxed())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
