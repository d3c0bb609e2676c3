//! PathTerm GUI Application
//!
//! A small workbench hosting the PathTerm add-on: file explorer, active
//! document, command menu, settings panel and notifications.

mod app;
mod host;
mod ui;

use anyhow::Context;
use eframe::egui;
use pathterm_core::Database;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathterm=debug".parse()?)
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting PathTerm v{}", pathterm_core::VERSION);

    let db = open_database()?;

    // Create tokio runtime for dispatch tasks
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let handle = runtime.handle().clone();
    let _guard = handle.enter();

    // Window configuration
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("PathTerm"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PathTerm",
        options,
        Box::new(move |cc| Ok(Box::new(app::PathTermApp::new(cc, runtime, db)))),
    )
    .map_err(|e| anyhow::anyhow!("PathTerm window failed: {e}"))
}

/// Open the settings database, falling back to an in-memory one.
fn open_database() -> anyhow::Result<Database> {
    let on_disk = Database::open().and_then(|db| {
        db.migrate()?;
        Ok(db)
    });
    match on_disk {
        Ok(db) => {
            tracing::info!(path = %db.path().display(), "Settings database opened");
            Ok(db)
        }
        Err(e) => {
            tracing::error!("Failed to open database: {e}, settings will not persist");
            let db = Database::open_in_memory().context("Failed to create in-memory database")?;
            db.migrate()?;
            Ok(db)
        }
    }
}
