//! Poses one question about a Spotify account's playlists and prints the
//! whole conversation once the model has answered it.

#[macro_use]
extern crate tracing;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use playlist_agent::tools::PlaylistToolbox;
use playlist_agent::{CatalogContext, DEFAULT_USER_ID};
use playlist_agent_core::{AgentBuilder, Conversation, TranscriptSource};
use playlist_agent_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use playlist_agent_spotify::{
    SpotifyClient, SpotifyConfigBuilder, request_access_token,
};

const DEFAULT_QUESTION: &str = "I would like to know if any tracks feature \
    more than once across my 'siren sessions' playlists, excluding the 'best \
    of ones'. I don't think there are any duplicates, but see if you can find \
    any, then tell me the tracks and playlists they feature in.";

// Higher values make the model invent tracks.
const TEMPERATURE: f32 = 0.1;

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{} {message}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let api_key = required_var("OPENAI_API_KEY")?;
    let client_id = required_var("SPOTIFY_API_CLIENTID")?;
    let client_secret = required_var("SPOTIFY_API_SECRET")?;
    let user_id =
        env::var("SPOTIFY_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_owned());
    let question = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_QUESTION.to_owned());

    let spotify_config =
        SpotifyConfigBuilder::with_credentials(client_id, client_secret)
            .build();
    let access_token = match request_access_token(&spotify_config).await {
        Ok(Some(access_token)) => access_token,
        Ok(None) => {
            return Err("Spotify rejected the client credentials".to_owned());
        }
        Err(err) => {
            return Err(format!("cannot get a Spotify access token: {err}"));
        }
    };
    let client = SpotifyClient::with_access_token(spotify_config, access_token);
    let context = Arc::new(CatalogContext::new(client, user_id));

    let mut openai_config =
        OpenAIConfigBuilder::with_api_key(api_key).with_temperature(TEMPERATURE);
    if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
        openai_config = openai_config.with_base_url(base_url);
    }
    if let Ok(model) = env::var("OPENAI_MODEL") {
        openai_config = openai_config.with_model(model);
    }
    let openai_config = openai_config.build();
    info!("using model {}", openai_config.model());
    let model_provider = OpenAIProvider::new(openai_config);

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .map_err(|err| err.to_string())?
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style);
    progress_bar.set_message("🤔 Thinking...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let agent = AgentBuilder::with_model_provider(model_provider)
        .with_toolbox(PlaylistToolbox::new(context))
        .on_tool_call({
            let progress_bar = progress_bar.clone();
            move |call| {
                progress_bar.println(format!(
                    "{}Calling {}...",
                    BAR_CHAR.bright_yellow(),
                    call.name
                ));
            }
        })
        .build();

    let result = agent.run(question).await;
    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();

    let conversation = result.map_err(|err| err.to_string())?;
    print_conversation(&conversation);
    Ok(())
}

fn required_var(name: &str) -> Result<String, String> {
    env::var(name)
        .map_err(|_| format!("{name} environment variable is not set"))
}

fn print_conversation(conversation: &Conversation) {
    for (transcript, source) in conversation.transcripts() {
        match source {
            TranscriptSource::User => {
                println!(
                    "{}🙂 {}",
                    BAR_CHAR.bright_green(),
                    transcript.bright_white()
                );
            }
            TranscriptSource::Assistant => {
                println!(
                    "{}🤖 {}",
                    BAR_CHAR.bright_cyan(),
                    transcript.bright_white()
                );
            }
            TranscriptSource::Tool => {
                println!("{}🔧 {}", BAR_CHAR.bright_black(), transcript.dimmed());
            }
        }
    }
}
