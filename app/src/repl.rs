use crate::terminal::TerminalView;
use anyhow::Result;
use rag_client::input::{Key, KeyPress, InputAction};
use rag_client::{Controller, DocumentApi, DocumentId, DocumentSummary, SearchMode};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Documents,
    Upload(PathBuf),
    Select(usize),
    Delete(usize),
    Mode(SearchMode),
    Info(usize),
    Search(String),
    WebSearch(String),
    Health,
    Help,
    Quit,
    Message(String),
}

impl ReplCommand {
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(ReplCommand::Message(input.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "docs" => Ok(ReplCommand::Documents),
            "upload" => required(arg, "/upload <путь>").map(|p| ReplCommand::Upload(PathBuf::from(p))),
            "select" => position(arg, "/select <n>").map(ReplCommand::Select),
            "delete" => position(arg, "/delete <n>").map(ReplCommand::Delete),
            "info" => position(arg, "/info <n>").map(ReplCommand::Info),
            "mode" => arg
                .parse::<SearchMode>()
                .map(ReplCommand::Mode)
                .map_err(|_| "Использование: /mode all|selected".to_string()),
            "search" => required(arg, "/search <запрос>").map(|q| ReplCommand::Search(q.to_string())),
            "web" => required(arg, "/web <запрос>").map(|q| ReplCommand::WebSearch(q.to_string())),
            "health" => Ok(ReplCommand::Health),
            "help" => Ok(ReplCommand::Help),
            "quit" | "exit" => Ok(ReplCommand::Quit),
            other => Err(format!("Неизвестная команда: /{other}. /help — список команд.")),
        }
    }
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("Использование: {usage}"))
    } else {
        Ok(arg)
    }
}

fn position(arg: &str, usage: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Использование: {usage}")),
    }
}

/// Maps a 1-based list position to the document id shown there.
pub fn document_at(documents: &[DocumentSummary], position: usize) -> Option<DocumentId> {
    position
        .checked_sub(1)
        .and_then(|idx| documents.get(idx))
        .map(|doc| doc.id)
}

/// Reads commands until `/quit` or end of input.
pub async fn run<A: DocumentApi>(controller: &mut Controller<A, TerminalView>) -> Result<()> {
    controller.view_mut().show_welcome();
    let mut draft = String::new();

    loop {
        controller.view_mut().prompt(!draft.is_empty());
        let Some(line) = controller.view_mut().read_line()? else {
            break;
        };

        let press = KeyPress {
            key: Key::Enter,
            shift: line.ends_with('\\'),
        };
        if press.action() == InputAction::InsertNewline {
            draft.push_str(&line[..line.len() - 1]);
            draft.push('\n');
            continue;
        }
        draft.push_str(&line);
        let text = std::mem::take(&mut draft);

        let command = match ReplCommand::parse(&text) {
            Ok(command) => command,
            Err(usage) => {
                controller.view_mut().show_usage_error(&usage);
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }
        dispatch(controller, command).await;
    }

    log::info!("Session finished");
    Ok(())
}

async fn dispatch<A: DocumentApi>(controller: &mut Controller<A, TerminalView>, command: ReplCommand) {
    let outcome = match command {
        ReplCommand::Documents => controller.load_documents().await,
        ReplCommand::Upload(path) => controller.upload_file(&path).await,
        ReplCommand::Select(n) => {
            if let Some(id) = resolve(controller, n) {
                controller.select_document(id);
            }
            return;
        }
        ReplCommand::Delete(n) => match resolve(controller, n) {
            Some(id) => controller.delete_document(id).await,
            None => return,
        },
        ReplCommand::Info(n) => match resolve(controller, n) {
            Some(id) => controller.show_document_details(id).await,
            None => return,
        },
        ReplCommand::Mode(mode) => {
            controller.set_search_mode(mode);
            return;
        }
        ReplCommand::Search(query) => controller.search_documents(&query).await,
        ReplCommand::WebSearch(query) => controller.web_search(&query).await,
        ReplCommand::Health => controller.health_check().await,
        ReplCommand::Help => {
            controller.view_mut().show_help();
            return;
        }
        ReplCommand::Quit => return,
        ReplCommand::Message(text) => controller.send_message(&text).await,
    };
    if !outcome.is_completed() {
        log::debug!("Command did not complete: {:?}", outcome);
    }
}

fn resolve<A: DocumentApi>(controller: &mut Controller<A, TerminalView>, position: usize) -> Option<DocumentId> {
    let id = document_at(controller.documents(), position);
    if id.is_none() {
        controller
            .view_mut()
            .show_usage_error(&format!("Нет документа с номером {position}"));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: DocumentId) -> DocumentSummary {
        DocumentSummary {
            id,
            filename: format!("{id}.pdf"),
            file_size: 1,
            chunk_count: 1,
            upload_date: "2024-01-01T00:00:00".to_string(),
            metadata: Default::default(),
        }
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            ReplCommand::parse("summary"),
            Ok(ReplCommand::Message("summary".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("  как дела?\nещё"),
            Ok(ReplCommand::Message("  как дела?\nещё".to_string()))
        );
    }

    #[test]
    fn slash_commands_parse_arguments() {
        assert_eq!(
            ReplCommand::parse("/upload ./docs/my report.pdf"),
            Ok(ReplCommand::Upload(PathBuf::from("./docs/my report.pdf")))
        );
        assert_eq!(ReplCommand::parse("/select 2"), Ok(ReplCommand::Select(2)));
        assert_eq!(ReplCommand::parse("/MODE selected"), Ok(ReplCommand::Mode(SearchMode::Selected)));
        assert_eq!(
            ReplCommand::parse("/web rust async"),
            Ok(ReplCommand::WebSearch("rust async".to_string()))
        );
        assert_eq!(ReplCommand::parse("/exit"), Ok(ReplCommand::Quit));
    }

    #[test]
    fn bad_arguments_report_usage() {
        assert!(ReplCommand::parse("/select 0").is_err());
        assert!(ReplCommand::parse("/delete x").is_err());
        assert!(ReplCommand::parse("/upload").is_err());
        assert!(ReplCommand::parse("/mode some").is_err());
        assert!(ReplCommand::parse("/frobnicate").is_err());
    }

    #[test]
    fn positions_are_one_based() {
        let docs = vec![doc(10), doc(20)];
        assert_eq!(document_at(&docs, 1), Some(10));
        assert_eq!(document_at(&docs, 2), Some(20));
        assert_eq!(document_at(&docs, 0), None);
        assert_eq!(document_at(&docs, 3), None);
    }
}
