//! User-facing text: a plain table from symbolic key to literal string.
//!
//! Everything here is data. Formatting helpers at the bottom only splice
//! values into the literals; no lookup happens at runtime beyond a `match`.

// ============================================================================
// ACTION SYMBOLS
// ============================================================================

/// Symbols the engine and its callers register as actions.
///
/// Matching is case-insensitive; these are stored in their normalized
/// (uppercase) form.
pub mod symbols {
    pub const QUIT: &str = "Q";
    pub const FORWARD: &str = "F";
    pub const BACK: &str = "B";
    pub const SELECT: &str = "S";
    pub const UP: &str = "U";
    pub const UP_ARROW: &str = "^";
    pub const PARENT: &str = "..";
    pub const GO: &str = "G";
}

// ============================================================================
// TEXT TABLE
// ============================================================================

/// Symbolic key for every fixed string shown on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    ApplicationName,
    Error,
    Info,
    Warning,
    Success,
    Hint,
    InvalidAction,
    Choose,
    NotAvailable,
    Picked,

    // Main menu
    MainMenuTitle,
    MainMenuDashboard,
    MainMenuChooser,
    MainMenuLauncher,
    MainMenuDemo,

    // File chooser
    ChooserTitle,
    ChooserUserName,
    ChooserUserHome,
    ChooserDirectory,
    ChooserHeadType,
    ChooserHeadName,
    ChooserHeadMode,
    ChooserHeadModified,
    ChooserHeadSize,
    ChooserParent,
    ChooserPickDirectory,
    ChooserPickFile,
    ChooserPickAny,
    NotADirectory,
    NotAFile,

    // Dashboard
    DashboardTitle,
    DashboardChecking,
    StatusOnline,
    StatusOffline,
    NoResponseFromServer,
    NoServices,
    NoServicesHint,
    ServicesOffline,

    // Launcher
    LauncherTitle,
    LauncherOpening,
    LauncherFailed,

    // Demo
    DemoTitle,
    DemoRandomIp,
    DemoRandomMac,
    DemoRandomPort,
    DemoRandomNumber,
    DemoRandomFloat,

    // Ages
    Seconds,
    MinutesShort,
    HourShort,
    Days,
}

impl Text {
    /// The literal for this key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Text::ApplicationName => "StarTerm",
            Text::Error => "ERROR",
            Text::Info => "INFO",
            Text::Warning => "WARNING",
            Text::Success => "SUCCESS",
            Text::Hint => "HINT",
            Text::InvalidAction => "invalid action",
            Text::Choose => "Choose",
            Text::NotAvailable => "N/A",
            Text::Picked => "picked",

            Text::MainMenuTitle => "Main Menu",
            Text::MainMenuDashboard => "Service Dashboard",
            Text::MainMenuChooser => "File Chooser",
            Text::MainMenuLauncher => "Launcher",
            Text::MainMenuDemo => "Demo Page",

            Text::ChooserTitle => "File Chooser",
            Text::ChooserUserName => "User Name",
            Text::ChooserUserHome => "User Home",
            Text::ChooserDirectory => "Directory",
            Text::ChooserHeadType => "T",
            Text::ChooserHeadName => "Name",
            Text::ChooserHeadMode => "Mode",
            Text::ChooserHeadModified => "Modified",
            Text::ChooserHeadSize => "Size",
            Text::ChooserParent => "..",
            Text::ChooserPickDirectory => "Choose a directory",
            Text::ChooserPickFile => "Choose a file",
            Text::ChooserPickAny => "Choose a file or directory",
            Text::NotADirectory => "not a directory",
            Text::NotAFile => "not a file",

            Text::DashboardTitle => "Service Dashboard",
            Text::DashboardChecking => "Checking services...",
            Text::StatusOnline => "ONLINE",
            Text::StatusOffline => "OFFLINE",
            Text::NoResponseFromServer => "no response from server",
            Text::NoServices => "No services configured",
            Text::NoServicesHint => "add services to the \"dashboard\" list in",
            Text::ServicesOffline => "services offline:",

            Text::LauncherTitle => "Launcher",
            Text::LauncherOpening => "opening",
            Text::LauncherFailed => "could not open",

            Text::DemoTitle => "Testing testing 123",
            Text::DemoRandomIp => "Random IP",
            Text::DemoRandomMac => "Random MAC",
            Text::DemoRandomPort => "Random Port",
            Text::DemoRandomNumber => "Random Number",
            Text::DemoRandomFloat => "Random Float",

            Text::Seconds => "secs",
            Text::MinutesShort => "mins",
            Text::HourShort => "hr",
            Text::Days => "days",
        }
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FORMATTED TEXT
// ============================================================================

/// "Page 2 of 5"
pub fn paging(current: usize, total: usize) -> String {
    format!("Page {current} of {total}")
}

/// "valid actions [Q, F, B]"
pub fn valid_actions(symbols: &str) -> String {
    format!("valid actions [{symbols}]")
}

/// Application banner line: "StarTerm - Utilities 0.1.0".
pub fn application_version() -> String {
    format!("{} - Utilities {}", Text::ApplicationName, env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_already_normalized() {
        for s in [
            symbols::QUIT,
            symbols::FORWARD,
            symbols::BACK,
            symbols::SELECT,
            symbols::UP,
            symbols::GO,
        ] {
            assert_eq!(s, s.to_uppercase());
        }
    }

    #[test]
    fn paging_text() {
        assert_eq!(paging(1, 3), "Page 1 of 3");
    }

    #[test]
    fn text_displays_its_literal() {
        assert_eq!(Text::Error.to_string(), "ERROR");
        assert_eq!(Text::StatusOnline.as_str(), "ONLINE");
    }
}
