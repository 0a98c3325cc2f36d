use std::fmt;
use std::str::FromStr;

/// Context size the basic profile sends with every chat query.
pub const BASIC_CONTEXT_LIMIT: u32 = 5;

/// The two controller configurations in use.
///
/// `Full` recognises the summary/referat commands and lets the backend choose
/// the context size. `Basic` sends every input as a chat query with a fixed
/// context size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Full,
    Basic,
}

impl Profile {
    pub fn commands_enabled(&self) -> bool {
        matches!(self, Profile::Full)
    }

    pub fn default_context_limit(&self) -> Option<u32> {
        match self {
            Profile::Full => None,
            Profile::Basic => Some(BASIC_CONTEXT_LIMIT),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => f.write_str("full"),
            Profile::Basic => f.write_str("basic"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Profile::Full),
            "basic" => Ok(Profile::Basic),
            other => Err(format!("unknown profile: {other} (expected full or basic)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub profile: Profile,
    /// Overrides the profile's context size when set.
    pub context_limit: Option<u32>,
    pub web_fetch_content: bool,
    /// Origin that relative server paths (PDF links) are resolved against.
    pub page_origin: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            context_limit: None,
            web_fetch_content: false,
            page_origin: "http://127.0.0.1:8000".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_context_limit(mut self, limit: Option<u32>) -> Self {
        self.context_limit = limit;
        self
    }

    pub fn with_web_fetch_content(mut self, fetch: bool) -> Self {
        self.web_fetch_content = fetch;
        self
    }

    pub fn with_page_origin(mut self, origin: impl Into<String>) -> Self {
        self.page_origin = origin.into();
        self
    }

    /// `context_limit` to send with chat queries; `None` leaves it to the backend.
    pub fn effective_context_limit(&self) -> Option<u32> {
        self.context_limit.or(self.profile.default_context_limit())
    }
}
