use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use session_core::{
    IntentOutcome, RuntimeError, SessionController, SessionEvent, SessionHandle, SessionRuntime,
    SystemClock,
};
use shared::protocol::SessionIntent;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
};
use tracing::warn;
use voice_integration::{
    DirectorySink, LogVoice, ProxyTtsClient, TtsVoice, VoicePromptService, VoiceSettings,
    DEFAULT_LOCALE,
};

mod commands;
mod render;

use commands::{parse_command, CliCommand, HELP};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the TTS proxy. Without it prompts are only logged.
    #[arg(long)]
    tts_url: Option<String>,
    /// Where synthesized prompts are written.
    #[arg(long, default_value = "voice-prompts")]
    audio_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let voice = build_voice(&args)?;
    let settings = VoiceSettings {
        locale: args.locale.clone(),
        ..VoiceSettings::default()
    };
    let session = SessionRuntime::spawn(SessionController::with_settings(
        SystemClock,
        voice,
        settings,
    ));
    tokio::spawn(print_events(session.subscribe()));

    println!("{}", render::snapshot(&session.snapshot().await?));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(CliCommand::Quit) => break,
            Ok(command) => run_command(&session, command).await?,
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

fn build_voice(args: &Args) -> Result<Arc<dyn VoicePromptService>> {
    let Some(url) = args.tts_url.as_deref() else {
        return Ok(Arc::new(LogVoice));
    };
    let client = ProxyTtsClient::new(url).with_context(|| format!("invalid --tts-url {url}"))?;
    Ok(Arc::new(TtsVoice::new(
        client,
        DirectorySink::new(args.audio_dir.clone()),
    )))
}

async fn run_command(session: &SessionHandle, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Session(intent) => dispatch(session, intent).await?,
        CliCommand::ListMoods => println!("{}", render::moods()),
        CliCommand::ListActivities => println!("{}", render::activities()),
        CliCommand::Status => println!("{}", render::snapshot(&session.snapshot().await?)),
        CliCommand::Help => println!("{HELP}"),
        CliCommand::Quit => {}
    }
    Ok(())
}

async fn dispatch(session: &SessionHandle, intent: SessionIntent) -> Result<()> {
    let name = intent.name();
    match session.dispatch(intent).await {
        Ok(IntentOutcome::Updated(snapshot)) => println!("{}", render::snapshot(&snapshot)),
        Ok(IntentOutcome::Prompted(cue)) => println!("🔊 {}", cue.text()),
        Ok(IntentOutcome::Finished(report)) => println!("{}", render::report(&report)),
        Err(RuntimeError::Session(err)) => {
            warn!(intent = name, error = %err, "intent rejected");
            println!("não foi possível agora: {err}");
        }
        Err(err @ RuntimeError::Closed) => return Err(err.into()),
    }
    Ok(())
}

async fn print_events(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::Milestone { minutes }) => {
                println!("⏱  {minutes} minutos! Continue assim.")
            }
            Ok(_) => {}
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}
