use clap::Parser;
use rag_client::{ClientConfig, Profile};

#[derive(Debug, Parser)]
#[command(name = "doc-chat", about = "Terminal client for the document chat backend")]
pub struct Args {
    /// Backend base URL
    #[arg(long, env = "DOC_CHAT_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Controller profile: `full` (summary/referat commands) or `basic` (plain chat)
    #[arg(long, env = "DOC_CHAT_PROFILE", default_value = "full")]
    pub profile: Profile,

    /// Number of context chunks to request per chat query
    #[arg(long, env = "DOC_CHAT_CONTEXT_LIMIT")]
    pub context_limit: Option<u32>,

    /// Ask the backend to fetch full pages for web search
    #[arg(long, env = "DOC_CHAT_WEB_FETCH_CONTENT")]
    pub web_fetch_content: bool,

    #[arg(long)]
    pub skip_health_check: bool,

    /// Disable ANSI styling
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Args {
    pub fn client_config(&self, origin: &str) -> ClientConfig {
        ClientConfig::default()
            .with_profile(self.profile)
            .with_context_limit(self.context_limit)
            .with_web_fetch_content(self.web_fetch_content)
            .with_page_origin(origin)
    }
}
