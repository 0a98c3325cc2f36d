use rag_client::view::{DocumentList, DocumentRow, NotificationKind, RenderedMessage, View};
use rag_client::{DocumentId, MessageId, SearchMode, Sender};
use std::io::{self, BufRead, Write};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const WELCOME: &str = "Загрузите документ (/upload <путь>) и задайте вопрос. /help — список команд.";

/// Line-oriented `View` over any reader/writer pair, stdin/stdout in production.
pub struct TerminalView {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    styled: bool,
    rows: Vec<DocumentRow>,
    highlighted: Option<DocumentId>,
    status: Option<String>,
    send_enabled: bool,
}

impl TerminalView {
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
            rows: Vec::new(),
            highlighted: None,
            status: None,
            send_enabled: true,
        }
    }

    pub fn stdio(styled: bool) -> Self {
        Self::new(
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
            styled,
        )
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.styled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    pub fn show_welcome(&mut self) {
        let text = self.paint(DIM, WELCOME);
        self.line(&text);
    }

    pub fn show_help(&mut self) {
        for text in [
            "/docs                 обновить список документов",
            "/upload <путь>        загрузить файл",
            "/select <n>           выбрать документ (повторно — снять выбор)",
            "/delete <n>           удалить документ",
            "/mode all|selected    область поиска",
            "/info <n>             сведения о документе",
            "/search <запрос>      поиск по фрагментам",
            "/web <запрос>         поиск в интернете",
            "/health               проверить сервер",
            "/quit                 выход",
            "summary | суммаризация, referat | реферат — команды для выбранного документа",
            "Строка, оканчивающаяся на \\, продолжается на следующей.",
        ] {
            self.line(text);
        }
    }

    pub fn show_usage_error(&mut self, message: &str) {
        let text = self.paint(RED, message);
        self.line(&text);
    }

    pub fn prompt(&mut self, continuation: bool) {
        let marker = match (continuation, self.send_enabled) {
            (true, _) => "… ",
            (false, true) => "> ",
            (false, false) => "⏳ ",
        };
        if let Err(e) = write!(self.output, "{}", marker).and_then(|_| self.output.flush()) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Next input line without its line terminator; `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    fn print_rows(&mut self) {
        let lines: Vec<String> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let marker = if Some(row.id) == self.highlighted { "▶" } else { " " };
                format!(
                    "{} {}. {}\n     {} · {} · {}",
                    marker,
                    idx + 1,
                    row.filename,
                    row.size,
                    row.chunks,
                    row.uploaded
                )
            })
            .collect();
        for text in lines {
            self.line(&text);
        }
    }
}

impl View for TerminalView {
    fn line_break(&self) -> &str {
        "\n"
    }

    fn show_documents(&mut self, list: DocumentList<'_>) {
        match list {
            DocumentList::Loading(text) => {
                let text = self.paint(DIM, text);
                self.line(&text);
            }
            DocumentList::Empty(text) => {
                self.rows.clear();
                self.line(text);
            }
            DocumentList::Rows(rows) => {
                self.rows = rows.to_vec();
                self.print_rows();
            }
            DocumentList::Error(message) => {
                self.rows.clear();
                let text = self.paint(RED, &message);
                self.line(&text);
            }
        }
    }

    fn highlight_document(&mut self, selected: Option<DocumentId>) {
        self.highlighted = selected.filter(|id| self.rows.iter().any(|row| row.id == *id));
    }

    fn show_status(&mut self, status: Option<&str>) {
        if self.status.as_deref() == status {
            return;
        }
        self.status = status.map(str::to_string);
        match status {
            Some(text) => self.line(text),
            None => {
                let text = self.paint(DIM, "Поиск по всем документам");
                self.line(&text);
            }
        }
    }

    fn sync_mode_control(&mut self, mode: SearchMode) {
        log::debug!("Search mode control set to {}", mode);
    }

    fn set_upload_control(&mut self, enabled: bool, label: &str) {
        if !enabled {
            self.line(label);
        }
    }

    // Paths are typed per command; there is no picked file to forget.
    fn reset_file_input(&mut self) {}

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn reset_chat_input(&mut self) {}

    fn append_message(&mut self, message: &RenderedMessage) {
        match (message.sender, message.is_loading) {
            // The user already sees what they typed.
            (Sender::User, _) => {}
            (Sender::Assistant, true) => {
                let text = self.paint(DIM, &message.body);
                self.line(&text);
            }
            (Sender::Assistant, false) => {
                self.line("");
                self.line(&message.body);
                if !message.sources.is_empty() {
                    self.line("");
                    self.line(rag_client::strings::SOURCES_HEADING);
                    for source in &message.sources {
                        self.line(source);
                    }
                }
                self.line("");
            }
        }
    }

    fn remove_message(&mut self, _id: MessageId) {}

    // The welcome line scrolls away with the first message.
    fn remove_welcome(&mut self) {}

    fn notify(&mut self, message: &str, kind: NotificationKind) {
        let text = match kind {
            NotificationKind::Error => self.paint(RED, &format!("[{}] {}", kind, message)),
            NotificationKind::Success => self.paint(GREEN, &format!("[{}] {}", kind, message)),
            NotificationKind::Info => format!("[{}] {}", kind, message),
        };
        self.line(&text);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if let Err(e) = write!(self.output, "{} [y/N] ", prompt).and_then(|_| self.output.flush()) {
            log::warn!("Failed to write to terminal: {}", e);
        }
        match self.read_line() {
            Ok(Some(answer)) => matches!(
                answer.trim().to_lowercase().as_str(),
                "y" | "yes" | "д" | "да"
            ),
            Ok(None) => false,
            Err(e) => {
                log::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn view(input: &str) -> (TerminalView, SharedBuffer) {
        let out = SharedBuffer::default();
        let view = TerminalView::new(
            Box::new(Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
            false,
        );
        (view, out)
    }

    fn row(id: DocumentId, filename: &str) -> DocumentRow {
        DocumentRow {
            id,
            filename: filename.to_string(),
            size: "1.5 KB".to_string(),
            chunks: "4 фрагментов".to_string(),
            uploaded: "15.01.2024, 10:30:00".to_string(),
        }
    }

    #[test]
    fn confirm_accepts_yes_in_both_languages() {
        let (mut view, out) = view("да\nn\n");
        assert!(view.confirm("Удалить?"));
        assert!(!view.confirm("Удалить?"));
        assert!(!view.confirm("Удалить?"));
        assert!(out.contents().starts_with("Удалить? [y/N] "));
    }

    #[test]
    fn read_line_strips_terminators() {
        let (mut view, _) = view("first\r\nsecond");
        assert_eq!(view.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(view.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(view.read_line().unwrap(), None);
    }

    #[test]
    fn rows_are_numbered_and_highlight_is_kept() {
        let (mut view, out) = view("");
        let rows = vec![row(7, "a.pdf"), row(9, "b.pdf")];
        view.show_documents(DocumentList::Rows(&rows));
        view.highlight_document(Some(9));
        view.print_rows();

        let text = out.contents();
        assert!(text.contains("  1. a.pdf\n     1.5 KB · 4 фрагментов · 15.01.2024, 10:30:00"));
        assert!(text.contains("▶ 2. b.pdf"));
    }

    #[test]
    fn highlight_ignores_unlisted_documents() {
        let (mut view, _) = view("");
        view.highlight_document(Some(1));
        assert_eq!(view.highlighted, None);
    }

    #[test]
    fn assistant_messages_print_sources() {
        let (mut view, out) = view("");
        view.append_message(&RenderedMessage {
            id: uuid_like(),
            sender: Sender::Assistant,
            is_loading: false,
            body: "Ответ".to_string(),
            sources: vec!["1. a.pdf (совпадение: 50.0%)".to_string()],
        });
        assert_eq!(
            out.contents(),
            "\nОтвет\n\nИсточники:\n1. a.pdf (совпадение: 50.0%)\n\n"
        );
    }

    #[test]
    fn status_line_prints_only_on_change() {
        let (mut view, out) = view("");
        view.show_status(Some("🎯 Поиск в документе: a.pdf"));
        view.show_status(Some("🎯 Поиск в документе: a.pdf"));
        view.show_status(None);
        assert_eq!(
            out.contents(),
            "🎯 Поиск в документе: a.pdf\nПоиск по всем документам\n"
        );
    }

    fn uuid_like() -> MessageId {
        rag_client::ChatMessage::assistant("").id
    }
}
