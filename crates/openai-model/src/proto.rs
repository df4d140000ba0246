use playlist_agent_model::{ModelMessage, ModelRequest, ModelTool};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::OpenAIConfig;

// -----------------------------------------------------------------
// Types received from the server (also replayed in later requests)
// -----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionToolCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

/// A tool call, either a streamed fragment or the accumulated whole.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(skip_serializing)]
    pub index: Option<u32>,
    pub id: Option<String>,
    pub r#type: Option<String>,
    pub function: Option<FunctionToolCall>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct FunctionTool {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Tool {
    r#type: &'static str,
    function: FunctionTool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

// -----------
// Conversions
// -----------

pub fn create_request(
    req: &ModelRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        tools: req.tools.iter().map(create_tool).collect(),
        temperature: config.temperature,
        stream: true,
    }
}

fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant(content) => Message::Assistant {
            content: Some(content.clone()),
            tool_calls: None,
        },
        ModelMessage::Tool(result) => Message::Tool {
            tool_call_id: result.id.clone(),
            content: result.content.clone(),
        },
        ModelMessage::Opaque(opaque_message) => {
            match opaque_message.to_raw::<Message>() {
                Some(msg) => msg.clone(),
                None => {
                    warn!(
                        "opaque message {} is not from this provider",
                        opaque_message.id()
                    );
                    Message::Assistant {
                        content: None,
                        tool_calls: None,
                    }
                }
            }
        }
    }
}

fn create_tool(tool: &ModelTool) -> Tool {
    Tool {
        r#type: "function",
        function: FunctionTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use playlist_agent_model::{OpaqueMessage, ToolCallResult};
    use serde_json::json;

    use super::*;
    use crate::OpenAIConfigBuilder;

    fn get_playlist_tool() -> ModelTool {
        ModelTool {
            name: "get_playlist".to_owned(),
            description: "Get a Spotify playlist and all of its tracks."
                .to_owned(),
            parameters: Some(json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" }
                },
                "required": ["id"]
            })),
        }
    }

    #[test]
    fn test_create_request() {
        let request = ModelRequest {
            messages: vec![ModelMessage::User("Any duplicates?".to_owned())],
            tools: vec![
                ModelTool {
                    name: "list_playlists".to_owned(),
                    description: "Get all my Spotify playlists.".to_owned(),
                    parameters: None,
                },
                get_playlist_tool(),
            ],
        };
        let config = OpenAIConfigBuilder::with_api_key("xxx")
            .with_model("custom")
            .with_temperature(0.1)
            .build();
        let expected = ChatCompletionRequest {
            model: "custom".to_owned(),
            messages: vec![Message::User {
                content: "Any duplicates?".to_owned(),
            }],
            tools: vec![
                Tool {
                    r#type: "function",
                    function: FunctionTool {
                        name: "list_playlists".to_owned(),
                        description: "Get all my Spotify playlists."
                            .to_owned(),
                        parameters: None,
                    },
                },
                Tool {
                    r#type: "function",
                    function: FunctionTool {
                        name: "get_playlist".to_owned(),
                        description:
                            "Get a Spotify playlist and all of its tracks."
                                .to_owned(),
                        parameters: get_playlist_tool().parameters,
                    },
                },
            ],
            temperature: Some(0.1),
            stream: true,
        };
        assert_eq!(create_request(&request, &config), expected);
    }

    #[test]
    fn test_serialize_tool_turn() {
        let assistant = Message::Assistant {
            content: None,
            tool_calls: Some(vec![ToolCall {
                index: Some(0),
                id: Some("call_1".to_owned()),
                r#type: Some("function".to_owned()),
                function: Some(FunctionToolCall {
                    name: Some("list_playlists".to_owned()),
                    arguments: Some("{}".to_owned()),
                }),
            }]),
        };
        let request = ModelRequest {
            messages: vec![
                ModelMessage::Opaque(OpaqueMessage::new("chatcmpl-1", assistant)),
                ModelMessage::Tool(ToolCallResult {
                    id: "call_1".to_owned(),
                    content: "Siren Sessions 01 (37i9dQ)".to_owned(),
                }),
            ],
            tools: vec![],
        };
        let config = OpenAIConfigBuilder::with_api_key("xxx").build();
        let value =
            serde_json::to_value(create_request(&request, &config)).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-4o",
                "messages": [
                    {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "list_playlists",
                                "arguments": "{}"
                            }
                        }]
                    },
                    {
                        "role": "tool",
                        "tool_call_id": "call_1",
                        "content": "Siren Sessions 01 (37i9dQ)"
                    }
                ],
                "stream": true
            })
        );
    }
}
