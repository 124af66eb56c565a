//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate alternative modifier for shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for help text
/// Ctrl+S works on all platforms (Cmd+S also works on macOS)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Reload shortcut display
/// - macOS: "Cmd+R"
/// - Linux/Windows: "Ctrl+R"
#[cfg(target_os = "macos")]
pub const RELOAD_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const RELOAD_SHORTCUT: &str = "Ctrl+R";
