//! Text tool and the prompt it asks for input.

use super::{ToolBehavior, ToolContext};
use crate::error::Result;
use crate::input::{PointerEvent, relative_pos};
use std::collections::VecDeque;

/// Message shown by the text tool's prompt.
pub const PROMPT_MESSAGE: &str = " Text:";

/// Synchronous text input.
///
/// Returns `None` when the user cancels. Hosts without an interactive
/// prompt can use [`QueuedPrompt`].
pub trait TextPrompt {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

/// Answers prompts from a queue; cancels once the queue is empty.
#[derive(Debug, Clone, Default)]
pub struct QueuedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl QueuedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a typed answer.
    pub fn answer(&mut self, text: impl Into<String>) -> &mut Self {
        self.answers.push_back(Some(text.into()));
        self
    }

    /// Queues a cancellation.
    pub fn cancel(&mut self) -> &mut Self {
        self.answers.push_back(None);
        self
    }

    /// Messages of every prompt shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn pending(&self) -> usize {
        self.answers.len()
    }
}

impl TextPrompt for QueuedPrompt {
    fn prompt(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }
}

/// Writes a line of text at the press position.
///
/// The font size follows the brush: `max(min_font_size, line_width)`.
/// No drag session is started.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTool;

impl ToolBehavior for TextTool {
    fn start(&self, event: &PointerEvent, tool: &mut ToolContext<'_>) -> Result<()> {
        let text = match tool.prompt.prompt(PROMPT_MESSAGE, "") {
            Some(text) if !text.is_empty() => text,
            _ => {
                log::debug!("Text input cancelled");
                return Ok(());
            }
        };

        let size = tool.settings.min_font_size.max(tool.cx.line_width());
        tool.cx.set_font_size(size);
        let at = relative_pos(event, tool.cx.canvas_bounds());
        log::debug!("Text '{text}' at {at:?} ({})", tool.cx.font_css());
        tool.cx.fill_text(&text, at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_prompt_answers_in_order_then_cancels() {
        let mut prompt = QueuedPrompt::new();
        prompt.answer("one").cancel().answer("");

        assert_eq!(prompt.prompt(PROMPT_MESSAGE, ""), Some("one".to_string()));
        assert_eq!(prompt.prompt(PROMPT_MESSAGE, ""), None);
        assert_eq!(prompt.prompt(PROMPT_MESSAGE, ""), Some(String::new()));
        assert_eq!(prompt.prompt(PROMPT_MESSAGE, ""), None);
        assert_eq!(prompt.asked().len(), 4);
        assert_eq!(prompt.pending(), 0);
    }
}
