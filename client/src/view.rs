//! The seam between the controller and whatever actually draws the UI.

use crate::format::{format_chunk_count, format_file_size, format_upload_date};
use crate::models::{DocumentId, DocumentSummary};
use crate::session::SearchMode;
use crate::transcript::{MessageId, Sender};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationKind::Info => "INFO",
            NotificationKind::Success => "SUCCESS",
            NotificationKind::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// One line of the document list, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub id: DocumentId,
    pub filename: String,
    pub size: String,
    pub chunks: String,
    pub uploaded: String,
}

impl From<&DocumentSummary> for DocumentRow {
    fn from(doc: &DocumentSummary) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            size: format_file_size(doc.file_size),
            chunks: format_chunk_count(doc.chunk_count),
            uploaded: format_upload_date(&doc.upload_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentList<'a> {
    Loading(&'a str),
    Empty(&'a str),
    Rows(&'a [DocumentRow]),
    Error(String),
}

/// A transcript entry with its body already rendered for the view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub is_loading: bool,
    pub body: String,
    /// Citation lines, empty when the reply had no sources.
    pub sources: Vec<String>,
}

/// Everything the controller needs from the UI. All calls happen on the UI thread.
pub trait View {
    /// Replacement for `\n` when a body is not Markdown-rendered.
    fn line_break(&self) -> &str {
        "<br>"
    }

    fn show_documents(&mut self, list: DocumentList<'_>);

    /// Clears every row highlight, then marks `selected` if it is listed.
    fn highlight_document(&mut self, selected: Option<DocumentId>);

    /// `None` hides the selected-document status line.
    fn show_status(&mut self, status: Option<&str>);

    fn sync_mode_control(&mut self, mode: SearchMode);

    fn set_upload_control(&mut self, enabled: bool, label: &str);

    /// Forgets the picked file so the same file can be picked again.
    fn reset_file_input(&mut self);

    fn set_send_enabled(&mut self, enabled: bool);

    /// Empties the chat box and shrinks it back to its initial height.
    fn reset_chat_input(&mut self);

    /// Line editors grow on their own and can ignore this.
    fn resize_chat_input(&mut self, _height: u32) {}

    fn append_message(&mut self, message: &RenderedMessage);

    fn remove_message(&mut self, id: MessageId);

    fn remove_welcome(&mut self);

    fn notify(&mut self, message: &str, kind: NotificationKind);

    /// Blocking yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
}
