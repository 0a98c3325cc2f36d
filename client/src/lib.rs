pub mod api_client;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod input;
pub mod markdown;
pub mod models;
pub mod session;
pub mod strings;
pub mod transcript;
pub mod view;

pub use api_client::{ApiClient, DocumentApi, UploadFile};
pub use config::{ClientConfig, Profile};
pub use controller::{Controller, Outcome};
pub use error::{ApiError, ApiResult};
pub use markdown::{MarkdownRenderer, TerminalMarkdown};
pub use models::*;
pub use session::{SearchMode, SelectionChange, SessionState};
pub use transcript::{ChatMessage, MessageId, Sender, Transcript};
pub use view::{DocumentList, DocumentRow, NotificationKind, RenderedMessage, View};
