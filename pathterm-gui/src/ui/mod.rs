//! UI components for the PathTerm workbench.

pub mod editor;
pub mod explorer;
pub mod menu;
pub mod notifications;
pub mod settings;
pub mod status;

// Theme-aware colors for the UI
pub mod colors {
    use eframe::egui::{Color32, Visuals};
    use pathterm_core::Severity;

    /// Accent blue (same for both themes)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);

    /// Warning amber
    pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);

    /// Error red
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    /// Stripe color for a notification
    pub fn severity(severity: Severity) -> Color32 {
        match severity {
            Severity::Info => ACCENT,
            Severity::Warning => WARNING,
            Severity::Error => ERROR,
        }
    }

    /// Get muted text color based on theme
    pub fn muted(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(156, 163, 175)
        } else {
            Color32::from_rgb(100, 100, 110)
        }
    }

    /// Get notification card background based on theme
    pub fn card_bg(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(40, 40, 45)
        } else {
            Color32::from_rgb(235, 240, 250)
        }
    }

    /// Get highlight for the active explorer entry based on theme
    pub fn active_bg(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(55, 55, 60)
        } else {
            Color32::from_rgb(240, 240, 245)
        }
    }
}
