//! Text commands typed at the prompt, mapped onto session intents.

use shared::{catalog, protocol::SessionIntent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Session(SessionIntent),
    ListMoods,
    ListActivities,
    Status,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<CliCommand, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let command = match verb.to_ascii_lowercase().as_str() {
        "mood" => {
            let mood = catalog::find_mood(rest)
                .ok_or_else(|| format!("unknown mood '{rest}'; try `moods`"))?;
            CliCommand::Session(SessionIntent::SelectMood { mood: mood.id })
        }
        "next" => CliCommand::Session(SessionIntent::ProceedToActivityChoice),
        "activity" => {
            let activity = catalog::find_activity(rest)
                .ok_or_else(|| format!("unknown activity '{rest}'; try `activities`"))?;
            CliCommand::Session(SessionIntent::SelectActivity {
                activity: activity.id,
            })
        }
        "pause" | "resume" | "p" => CliCommand::Session(SessionIntent::TogglePause),
        "voice" | "v" => CliCommand::Session(SessionIntent::RequestVoicePrompt),
        "finish" => CliCommand::Session(SessionIntent::Finish),
        "reset" => CliCommand::Session(SessionIntent::Reset),
        "moods" => CliCommand::ListMoods,
        "activities" => CliCommand::ListActivities,
        "status" | "s" => CliCommand::Status,
        "help" | "?" => CliCommand::Help,
        "quit" | "exit" | "q" => CliCommand::Quit,
        "" => return Err("type `help` for commands".to_string()),
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

pub const HELP: &str = "\
commands:
  moods | activities      list the options
  mood <id|label>         check in with a mood
  next                    go to the activity picker
  activity <id|name>      start the workout
  pause                   pause or resume
  voice                   ask for encouragement
  finish                  stop and show the report
  reset                   start over
  status                  show the current session
  quit";
