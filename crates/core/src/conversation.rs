//! Conversation-related types.

use playlist_agent_model::{ModelMessage, OpaqueMessage, ToolCallResult};

/// Who produced a conversation item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TranscriptSource {
    /// The user's question.
    User,
    /// The model.
    Assistant,
    /// A tool result fed back to the model.
    Tool,
}

/// An append-only conversation.
#[derive(Clone, Default, Debug)]
pub struct Conversation {
    items: Vec<Item>,
}

impl Conversation {
    /// Returns all items, oldest first.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the text of every item that has any, in append order.
    pub fn transcripts(&self) -> impl Iterator<Item = (&str, TranscriptSource)> {
        self.items
            .iter()
            .filter(|item| !item.transcript.is_empty())
            .map(|item| (item.transcript.as_str(), item.source))
    }

    pub(crate) fn messages(&self) -> Vec<ModelMessage> {
        self.items.iter().map(|item| item.msg.clone()).collect()
    }

    pub(crate) fn push_user(&mut self, input: String) {
        self.items.push(Item {
            msg: ModelMessage::User(input.clone()),
            transcript: input,
            source: TranscriptSource::User,
        });
    }

    pub(crate) fn push_assistant(
        &mut self,
        opaque_msg: Option<OpaqueMessage>,
        transcript: String,
    ) {
        let msg = match opaque_msg {
            Some(opaque_msg) => ModelMessage::Opaque(opaque_msg),
            // Downgrade to a text-only message.
            None => ModelMessage::Assistant(transcript.clone()),
        };
        self.items.push(Item {
            msg,
            transcript,
            source: TranscriptSource::Assistant,
        });
    }

    pub(crate) fn push_tool_result(&mut self, id: String, content: String) {
        self.items.push(Item {
            msg: ModelMessage::Tool(ToolCallResult {
                id,
                content: content.clone(),
            }),
            transcript: content,
            source: TranscriptSource::Tool,
        });
    }
}

/// An item in the conversation.
#[derive(Clone, Debug)]
pub struct Item {
    msg: ModelMessage,
    transcript: String,
    source: TranscriptSource,
}

impl Item {
    /// Returns the message as it is sent to the model.
    #[inline]
    pub fn message(&self) -> &ModelMessage {
        &self.msg
    }

    /// Returns the plain text of this item. Empty for an assistant turn
    /// that only requested tool calls.
    #[inline]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Returns who produced this item.
    #[inline]
    pub fn source(&self) -> TranscriptSource {
        self.source
    }
}
