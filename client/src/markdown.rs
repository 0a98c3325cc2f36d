use crate::transcript::Sender;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Markdown rendering failed: {0}")]
pub struct RenderError(pub String);

/// Turns Markdown into whatever the view displays.
pub trait MarkdownRenderer {
    fn render(&self, text: &str) -> Result<String, RenderError>;
}

pub fn newlines_to_breaks(text: &str, line_break: &str) -> String {
    text.replace('\n', line_break)
}

/// Body of a transcript entry as the view should show it.
///
/// Finished assistant replies go through `renderer` when there is one and it
/// succeeds. Everything else, user text included, only has its newlines
/// swapped for `line_break`. Loading placeholders stay literal.
pub fn render_body(
    text: &str,
    sender: Sender,
    is_loading: bool,
    renderer: Option<&dyn MarkdownRenderer>,
    line_break: &str,
) -> String {
    match sender {
        Sender::Assistant if is_loading => text.to_string(),
        Sender::Assistant => match renderer {
            Some(renderer) => renderer.render(text).unwrap_or_else(|e| {
                log::error!("{}", e);
                newlines_to_breaks(text, line_break)
            }),
            None => {
                log::warn!("No Markdown renderer configured, using plain line breaks");
                newlines_to_breaks(text, line_break)
            }
        },
        Sender::User => newlines_to_breaks(text, line_break),
    }
}

/// Renders the Markdown subset the backend emits as plain terminal text.
pub struct TerminalMarkdown {
    styled: bool,
    heading: Regex,
    link: Regex,
    strong: Regex,
    emphasis: Regex,
    rule: Regex,
}

impl TerminalMarkdown {
    /// `styled` adds ANSI bold to headings and strong text.
    pub fn new(styled: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            styled,
            heading: Regex::new(r"(?m)^#{1,6}\s+(.+)$")?,
            link: Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)")?,
            strong: Regex::new(r"\*\*(.+?)\*\*")?,
            emphasis: Regex::new(r"\*([^*\n]+)\*")?,
            rule: Regex::new(r"(?m)^-{3,}[ \t]*$")?,
        })
    }

    fn bold(&self) -> &'static str {
        if self.styled {
            "\x1b[1m$1\x1b[0m"
        } else {
            "$1"
        }
    }
}

impl MarkdownRenderer for TerminalMarkdown {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        let out = self.link.replace_all(text, "$1 <$2>");
        let out = self.heading.replace_all(&out, self.bold());
        let out = self.strong.replace_all(&out, self.bold());
        let out = self.emphasis.replace_all(&out, "$1");
        let out = self.rule.replace_all(&out, "────────────────────");
        Ok(out.into_owned())
    }
}
