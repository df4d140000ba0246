use std::sync::Arc;

use playlist_agent::CatalogContext;
use playlist_agent::core::tool::ErrorKind;
use playlist_agent::core::{AgentBuilder, Error};
use playlist_agent::tools::PlaylistToolbox;
use playlist_agent_model::{ModelFinishReason, ToolCallRequest};
use playlist_agent_spotify::{SpotifyClient, SpotifyConfigBuilder};
use playlist_agent_test_model::{
    PresetEvent, PresetResponse, TestModelProvider,
};
use serde_json::{Value, json};

fn offline_toolbox() -> PlaylistToolbox {
    let config = SpotifyConfigBuilder::with_credentials("id", "secret")
        .with_api_base_url("http://127.0.0.1:9/v1")
        .with_accounts_url("http://127.0.0.1:9")
        .build();
    let client = SpotifyClient::with_access_token(config, "token");
    PlaylistToolbox::new(Arc::new(CatalogContext::new(client, "firkinfedup")))
}

fn call(name: &str, arguments: Value) -> PresetEvent {
    PresetEvent::ToolCall(ToolCallRequest {
        id: "call_1".to_owned(),
        name: name.to_owned(),
        arguments,
    })
}

#[tokio::test]
async fn test_declares_both_tools() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_assistant_turn(PresetResponse::text("Hello."));
    let requests = model_provider.clone();

    let agent = AgentBuilder::with_model_provider(model_provider)
        .with_toolbox(offline_toolbox())
        .build();
    agent.run("Hi").await.unwrap();

    let requests = requests.requests();
    let tools = &requests[0].tools;
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].name, "list_playlists");
    assert!(tools[0].description.starts_with("Get all my Spotify playlists."));
    assert_eq!(tools[1].name, "get_playlist");
    assert_eq!(
        tools[1].description,
        "Get a Spotify playlist and all of its tracks."
    );
    let parameters = tools[1].parameters.as_ref().unwrap();
    assert_eq!(parameters["required"], json!(["id"]));
}

#[tokio::test]
async fn test_playlist_without_id() {
    let mut model_provider = TestModelProvider::default();
    model_provider
        .add_assistant_turn(PresetResponse::with_events([call("get_playlist", json!({}))]));
    model_provider.add_assistant_turn(PresetResponse::text("unreachable"));
    let requests = model_provider.clone();

    let agent = AgentBuilder::with_model_provider(model_provider)
        .with_toolbox(offline_toolbox())
        .build();
    let err = agent.run("What's on my playlist?").await.unwrap_err();

    match err {
        Error::Tool { name, source, .. } => {
            assert_eq!(name, "get_playlist");
            assert_eq!(source.kind(), ErrorKind::InvalidInput);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(requests.requests().len(), 1);
}

#[tokio::test]
async fn test_unreachable_catalog() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_assistant_turn(PresetResponse::with_events([call(
        "list_playlists",
        Value::Null,
    )]));

    let agent = AgentBuilder::with_model_provider(model_provider)
        .with_toolbox(offline_toolbox())
        .build();
    let err = agent.run("List my playlists").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Tool { source, .. } if source.kind() == ErrorKind::ExecutionError
    ));
}

#[tokio::test]
async fn test_cut_off_answer() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_assistant_turn(
        PresetResponse::text("The duplicates are")
            .with_finish_reason(ModelFinishReason::Length),
    );
    let agent = AgentBuilder::with_model_provider(model_provider)
        .with_toolbox(offline_toolbox())
        .build();
    let err = agent.run("Any duplicates?").await.unwrap_err();
    assert!(matches!(err, Error::Length));
}
