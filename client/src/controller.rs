use crate::api_client::{DocumentApi, UploadFile};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::format;
use crate::input::{textarea_height, ChatCommand};
use crate::markdown::{render_body, MarkdownRenderer};
use crate::models::*;
use crate::session::{SearchMode, SelectionChange, SessionState};
use crate::strings;
use crate::transcript::{ChatMessage, MessageId, Transcript};
use crate::view::{DocumentList, DocumentRow, NotificationKind, RenderedMessage, View};
use std::path::Path;

/// How a user action ended. Failures have already been shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Nothing was sent: empty input, a declined prompt or a missing selection.
    Skipped,
    Failed(String),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Drives the document chat UI: every user action is one async handler here.
pub struct Controller<A: DocumentApi, V: View> {
    api: A,
    view: V,
    config: ClientConfig,
    session: SessionState,
    transcript: Transcript,
    documents: Vec<DocumentSummary>,
    renderer: Option<Box<dyn MarkdownRenderer>>,
}

impl<A: DocumentApi, V: View> Controller<A, V> {
    pub fn new(api: A, view: V, config: ClientConfig) -> Self {
        Self {
            api,
            view,
            config,
            session: SessionState::new(),
            transcript: Transcript::new(),
            documents: Vec::new(),
            renderer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn MarkdownRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Documents from the last successful listing.
    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub async fn initialize(&mut self) -> Outcome {
        log::info!(
            "Starting document chat (profile: {}, context limit: {:?})",
            self.config.profile,
            self.config.effective_context_limit()
        );
        self.view.set_upload_control(true, strings::UPLOAD_IDLE_LABEL);
        self.view.sync_mode_control(self.session.mode());
        self.refresh_status();
        self.load_documents().await
    }

    pub async fn health_check(&mut self) -> Outcome {
        match self.api.health().await {
            Ok(health) => {
                log::info!("Backend health: {}", health.status);
                Outcome::Completed
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("Backend health check failed: {}", message);
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        }
    }

    // ---- documents ----

    pub async fn load_documents(&mut self) -> Outcome {
        self.view.show_documents(DocumentList::Loading(strings::DOCUMENTS_LOADING));

        let documents = match self.api.list_documents().await {
            Ok(documents) => documents,
            Err(e) => {
                let message = e.user_message(strings::LIST_FAILED, false);
                log::error!("Failed to load documents: {}", e);
                self.view.show_documents(DocumentList::Error(strings::error_text(&message)));
                return Outcome::Failed(message);
            }
        };

        log::info!("Loaded {} documents", documents.len());
        self.documents = documents;

        if self.documents.is_empty() {
            self.view.show_documents(DocumentList::Empty(strings::DOCUMENTS_EMPTY));
        } else {
            let rows: Vec<DocumentRow> = self.documents.iter().map(DocumentRow::from).collect();
            self.view.show_documents(DocumentList::Rows(&rows));
            self.view.highlight_document(self.session.selected());
        }
        self.refresh_status();
        Outcome::Completed
    }

    pub async fn upload_file(&mut self, path: &Path) -> Outcome {
        // Lock the upload control while the file is in flight
        self.view.set_upload_control(false, strings::UPLOAD_BUSY_LABEL);

        let outcome = match self.send_upload(path).await {
            Ok(result) => {
                log::info!("Uploaded {}", path.display());
                self.notify(&result.message, NotificationKind::Success);
                self.load_documents().await;
                Outcome::Completed
            }
            Err(e) => {
                let message = e.user_message(strings::UPLOAD_FAILED, false);
                log::error!("Upload of {} failed: {}", path.display(), e);
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        };

        // Restore controls on both paths
        self.view.set_upload_control(true, strings::UPLOAD_IDLE_LABEL);
        self.view.reset_file_input();
        outcome
    }

    async fn send_upload(&self, path: &Path) -> Result<MessageResponse, ApiError> {
        let file = UploadFile::read(path).await?;
        self.api.upload(file).await
    }

    /// Row click: toggles the selection and redraws highlight and status line.
    pub fn select_document(&mut self, id: DocumentId) -> SelectionChange {
        let change = self.session.toggle_selection(id);
        log::debug!("Selection changed: {:?}", change);

        if let SelectionChange::Selected(_) = change {
            self.view.sync_mode_control(SearchMode::Selected);
        }
        self.view.highlight_document(self.session.selected());
        self.refresh_status();
        change
    }

    /// Mode switch by the user.
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.session.set_mode(mode);
        self.refresh_status();
    }

    pub async fn delete_document(&mut self, id: DocumentId) -> Outcome {
        if !self.view.confirm(strings::CONFIRM_DELETE) {
            log::debug!("Deletion of document {} declined", id);
            return Outcome::Skipped;
        }

        match self.api.delete_document(id).await {
            Ok(result) => {
                log::info!("Deleted document {}", id);
                self.notify(&result.message, NotificationKind::Success);
                // Drop a selection that points at the deleted document
                if self.session.forget_document(id) {
                    self.refresh_status();
                }
                self.load_documents().await;
                Outcome::Completed
            }
            Err(e) => {
                let message = e.user_message(strings::DELETE_FAILED, false);
                log::error!("Deletion of document {} failed: {}", id, e);
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        }
    }

    pub async fn show_document_details(&mut self, id: DocumentId) -> Outcome {
        match self.api.get_document(id).await {
            Ok(doc) => {
                self.add_message(ChatMessage::assistant(format::document_details_message(&doc)));
                Outcome::Completed
            }
            Err(e) => {
                let message = e.user_message(strings::DOCUMENT_NOT_FOUND, false);
                log::error!("Fetching document {} failed: {}", id, e);
                self.add_message(ChatMessage::assistant(strings::error_text(&message)));
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        }
    }

    fn refresh_status(&mut self) {
        let status = self.session.status_target().and_then(|id| {
            self.documents
                .iter()
                .find(|doc| doc.id == id)
                .map(|doc| strings::status_line(&doc.filename))
        });
        self.view.show_status(status.as_deref());
    }

    // ---- chat ----

    /// Submits the chat box. Commands run their own operation, anything else is a query.
    pub async fn send_message(&mut self, input: &str) -> Outcome {
        let query = input.trim();
        if query.is_empty() {
            return Outcome::Skipped;
        }

        self.view.set_send_enabled(false);
        self.add_message(ChatMessage::user(query));
        self.view.reset_chat_input();

        let command = if self.config.profile.commands_enabled() {
            ChatCommand::parse(query)
        } else {
            None
        };
        log::debug!("Dispatching {:?} (command: {:?})", query, command);

        let outcome = match command {
            Some(ChatCommand::Summary) => self.summarize().await,
            Some(ChatCommand::Referat) => self.create_referat().await,
            None => self.chat(query).await,
        };

        self.view.set_send_enabled(true);
        outcome
    }

    /// Chat box content changed; `content_height` is what the text wants in pixels.
    pub fn chat_input_changed(&mut self, content_height: u32) {
        self.view.resize_chat_input(textarea_height(content_height));
    }

    pub async fn chat(&mut self, query: &str) -> Outcome {
        let placeholder = self.add_message(ChatMessage::loading(strings::THINKING));

        let request = ChatRequest {
            query: query.to_string(),
            context_limit: self.config.effective_context_limit(),
            document_id: self.session.chat_scope(),
        };

        match self.api.chat(&request).await {
            Ok(result) => {
                self.remove_message(placeholder);
                log::info!("Answer received with {} sources", result.sources.len());
                self.add_message(ChatMessage::assistant(result.answer).with_sources(result.sources));
                Outcome::Completed
            }
            Err(e) => {
                self.remove_message(placeholder);
                let message = e.user_message(strings::CHAT_FAILED, false);
                log::error!("Chat query failed: {}", e);
                self.add_message(ChatMessage::assistant(strings::error_text(&message)));
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        }
    }

    pub async fn summarize(&mut self) -> Outcome {
        let Some(id) = self.session.selected() else {
            self.add_message(ChatMessage::assistant(strings::SELECT_FOR_SUMMARY));
            self.notify(strings::SELECT_HINT, NotificationKind::Error);
            return Outcome::Skipped;
        };

        let placeholder = self.add_message(ChatMessage::loading(strings::SUMMARY_PENDING));

        match self.api.summarize(id).await {
            Ok(result) => {
                self.remove_message(placeholder);
                self.add_message(ChatMessage::assistant(format::summary_message(&result)));
                self.notify(strings::SUMMARY_DONE, NotificationKind::Success);
                Outcome::Completed
            }
            Err(e) => {
                self.remove_message(placeholder);
                let message = e.user_message(strings::SUMMARY_FAILED, true);
                log::error!("Summarization of document {} failed: {}", id, e);
                self.add_message(ChatMessage::assistant(strings::summary_error(&message)));
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        }
    }

    pub async fn create_referat(&mut self) -> Outcome {
        let Some(id) = self.session.selected() else {
            self.add_message(ChatMessage::assistant(strings::SELECT_FOR_REFERAT));
            self.notify(strings::SELECT_HINT, NotificationKind::Error);
            return Outcome::Skipped;
        };

        let placeholder = self.add_message(ChatMessage::loading(strings::REFERAT_PENDING));

        match self.api.referat(id).await {
            Ok(result) => {
                self.remove_message(placeholder);
                // Relative PDF paths resolve against the page origin
                let link = format::build_pdf_url(&result.pdf_url, &self.config.page_origin);
                log::info!("Referat PDF: {} -> {}", result.pdf_url, link);
                self.add_message(ChatMessage::assistant(format::referat_message(&result, &link)));
                self.notify(strings::REFERAT_DONE, NotificationKind::Success);
                Outcome::Completed
            }
            Err(e) => {
                self.remove_message(placeholder);
                let message = e.user_message(strings::REFERAT_FAILED, true);
                log::error!("Referat for document {} failed: {}", id, e);
                self.add_message(ChatMessage::assistant(strings::referat_error(&message)));
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        }
    }

    /// Semantic search over the indexed chunks, scoped like a chat query.
    pub async fn search_documents(&mut self, input: &str) -> Outcome {
        let query = input.trim();
        if query.is_empty() {
            return Outcome::Skipped;
        }

        self.view.set_send_enabled(false);
        self.add_message(ChatMessage::user(query));
        let placeholder = self.add_message(ChatMessage::loading(strings::SEARCHING));

        let request = ChatRequest {
            query: query.to_string(),
            context_limit: self.config.effective_context_limit(),
            document_id: self.session.chat_scope(),
        };

        let outcome = match self.api.search(&request).await {
            Ok(result) => {
                self.remove_message(placeholder);
                log::info!("Search returned {} hits", result.results.len());
                self.add_message(ChatMessage::assistant(format::search_results_message(
                    query,
                    &result.results,
                )));
                Outcome::Completed
            }
            Err(e) => {
                self.remove_message(placeholder);
                let message = e.user_message(strings::SEARCH_FAILED, false);
                log::error!("Search failed: {}", e);
                self.add_message(ChatMessage::assistant(strings::error_text(&message)));
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        };

        self.view.set_send_enabled(true);
        outcome
    }

    pub async fn web_search(&mut self, input: &str) -> Outcome {
        let query = input.trim();
        if query.is_empty() {
            return Outcome::Skipped;
        }

        self.view.set_send_enabled(false);
        self.add_message(ChatMessage::user(query));
        let placeholder = self.add_message(ChatMessage::loading(strings::WEB_SEARCHING));

        let request = WebSearchRequest {
            query: query.to_string(),
            fetch_content: self.config.web_fetch_content,
        };

        let outcome = match self.api.web_search(&request).await {
            Ok(result) => {
                self.remove_message(placeholder);
                log::info!("Web search returned {} results", result.results.len());
                self.add_message(ChatMessage::assistant(format::web_search_message(&result)));
                Outcome::Completed
            }
            Err(e) => {
                self.remove_message(placeholder);
                let message = e.user_message(strings::WEB_SEARCH_FAILED, true);
                log::error!("Web search failed: {}", e);
                self.add_message(ChatMessage::assistant(strings::error_text(&message)));
                self.notify(&strings::error_text(&message), NotificationKind::Error);
                Outcome::Failed(message)
            }
        };

        self.view.set_send_enabled(true);
        outcome
    }

    // ---- transcript ----

    fn add_message(&mut self, message: ChatMessage) -> MessageId {
        let rendered = RenderedMessage {
            id: message.id,
            sender: message.sender,
            is_loading: message.is_loading,
            body: render_body(
                &message.text,
                message.sender,
                message.is_loading,
                self.renderer.as_deref(),
                self.view.line_break(),
            ),
            sources: message
                .sources
                .iter()
                .flatten()
                .enumerate()
                .map(|(idx, source)| format::format_source_line(idx + 1, source))
                .collect(),
        };

        let id = message.id;
        if self.transcript.push(message) {
            self.view.remove_welcome();
        }
        self.view.append_message(&rendered);
        id
    }

    fn remove_message(&mut self, id: MessageId) {
        self.transcript.remove(id);
        self.view.remove_message(id);
    }

    fn notify(&mut self, message: &str, kind: NotificationKind) {
        log::info!("[{}] {}", kind, message);
        self.view.notify(message, kind);
    }
}
