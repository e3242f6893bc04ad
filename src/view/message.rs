use crate::error::AppError;
use crate::view::dom::{Node, el};

/// The visual tone of an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Danger,
    Muted,
}

impl Tone {
    /// The CSS classes for a message block.
    pub fn class(&self) -> String {
        format!("mt-3 {}", self.text_class())
    }

    /// The CSS text class alone, for table cells and list items.
    pub fn text_class(&self) -> &'static str {
        match self {
            Tone::Info => "text-info",
            Tone::Success => "text-success",
            Tone::Danger => "text-danger",
            Tone::Muted => "text-muted",
        }
    }
}

/// An inline status line shown under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Danger,
        }
    }

    /// Renders the message as a `<div>` with the given element id.
    pub fn to_node(&self, id: &str) -> Node {
        el("div").id(id).class(self.tone.class()).text(&self.text).into()
    }
}

/// Picks the text to show for a failed operation.
///
/// The server's own message wins when it sent one; transport failures get
/// `network`; everything else gets `fallback`.
///
/// # Arguments
///
/// * `err` - The failure.
/// * `fallback` - The per-operation generic message.
/// * `network` - The per-operation connectivity message.
pub fn failure_text<'a>(err: &'a AppError, fallback: &'a str, network: &'a str) -> &'a str {
    if err.is_transport() {
        return network;
    }
    err.server_message().unwrap_or(fallback)
}

/// Builds the full error line for a failed operation.
///
/// Transport failures show `network` alone; anything else shows `prefix`
/// followed by [`failure_text`].
///
/// # Arguments
///
/// * `err` - The failure.
/// * `prefix` - Put before the server or fallback text, e.g. `"Error: "`.
/// * `fallback` - The per-operation generic message.
/// * `network` - The per-operation connectivity message.
pub fn error_text(err: &AppError, prefix: &str, fallback: &str, network: &str) -> String {
    if err.is_transport() {
        return network.to_string();
    }
    format!("{}{}", prefix, failure_text(err, fallback, network))
}
