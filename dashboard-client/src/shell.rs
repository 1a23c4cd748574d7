//! App shell view state: theme, sidebar, navigation, shortcuts, notifications

use std::time::Duration;

use tokio::time::Instant;

/// How long an error notification stays up
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Layouts at or below this width overlay the sidebar instead of pushing content
pub const NARROW_LAYOUT_MAX_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Dashboard,
    Analytics,
    Trading,
    News,
    Team,
    Forecast,
    Sentiment,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Analytics,
        Section::Trading,
        Section::News,
        Section::Team,
        Section::Forecast,
        Section::Sentiment,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Analytics => "analytics",
            Section::Trading => "trading",
            Section::News => "news",
            Section::Team => "team",
            Section::Forecast => "forecast",
            Section::Sentiment => "sentiment",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Analytics => "Analytics",
            Section::Trading => "Mock Trading",
            Section::News => "News",
            Section::Team => "Team",
            Section::Forecast => "Forecast",
            Section::Sentiment => "Sentiment",
        }
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

/// Keyboard shortcuts (all with Ctrl held)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleSidebar,
    ToggleTheme,
    ToggleChat,
}

impl Shortcut {
    /// Map a key pressed together with Ctrl
    pub fn from_ctrl_key(key: &str) -> Option<Self> {
        match key {
            "b" | "B" => Some(Shortcut::ToggleSidebar),
            "t" | "T" => Some(Shortcut::ToggleTheme),
            " " | "Space" => Some(Shortcut::ToggleChat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < NOTIFICATION_TTL
    }

    pub fn expires_at(&self) -> Instant {
        self.shown_at + NOTIFICATION_TTL
    }
}

#[derive(Debug, Clone)]
pub struct ShellState {
    pub theme: Theme,
    pub sidebar_open: bool,
    pub section: Section,
    pub chat_open: bool,
    pub viewport_width: u32,
    notification: Option<Notification>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sidebar_open: false,
            section: Section::Dashboard,
            chat_open: false,
            viewport_width: 1280,
            notification: None,
        }
    }
}

impl ShellState {
    pub fn is_narrow(&self) -> bool {
        self.viewport_width <= NARROW_LAYOUT_MAX_WIDTH
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn toggle_chat(&mut self) {
        self.chat_open = !self.chat_open;
    }

    /// Switch sections; narrow layouts close the sidebar afterwards
    pub fn navigate(&mut self, section: Section) {
        self.section = section;
        if self.is_narrow() {
            self.sidebar_open = false;
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ToggleSidebar => self.toggle_sidebar(),
            Shortcut::ToggleTheme => {
                self.toggle_theme();
            }
            Shortcut::ToggleChat => self.toggle_chat(),
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// The current notification, if it has not expired
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible())
    }
}
