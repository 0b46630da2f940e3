use serde::{Deserialize, Serialize};
use shared::domain::ActivityId;

pub const MILESTONE_MINUTES: u64 = 5;
pub const MID_SESSION_MINUTES: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoiceCue {
    Start { activity: ActivityId },
    Pause,
    Resume,
    Milestone { minutes: u64 },
    Encouragement { minutes: u64 },
    Mid { minutes: u64 },
    Completion { minutes: u64 },
}

impl VoiceCue {
    /// On-demand prompt for the given elapsed minutes.
    pub fn on_demand(minutes: u64) -> Self {
        if minutes > 0 && minutes % MILESTONE_MINUTES == 0 {
            VoiceCue::Encouragement { minutes }
        } else if minutes >= MID_SESSION_MINUTES {
            VoiceCue::Mid { minutes }
        } else {
            VoiceCue::Encouragement { minutes }
        }
    }

    pub fn text(&self) -> String {
        match *self {
            VoiceCue::Start { activity } => start_text(activity).to_string(),
            VoiceCue::Pause => "Pausa registrada. Respire, eu espero você.".to_string(),
            VoiceCue::Resume => "De volta ao movimento! Continue assim.".to_string(),
            VoiceCue::Milestone { minutes } => {
                format!("Você já completou {}. Incrível!", minutes_phrase(minutes))
            }
            VoiceCue::Encouragement { minutes: 0 } => {
                "Você começou, e isso já é uma vitória!".to_string()
            }
            VoiceCue::Encouragement { minutes } => format!(
                "{} de movimento. Você está indo muito bem!",
                minutes_phrase(minutes)
            ),
            VoiceCue::Mid { minutes } => format!(
                "Já são {}! Mantenha o ritmo e lembre de se hidratar.",
                minutes_phrase(minutes)
            ),
            VoiceCue::Completion { minutes } => format!(
                "Treino concluído! {} de puro cuidado com você.",
                minutes_phrase(minutes)
            ),
        }
    }
}

fn start_text(activity: ActivityId) -> &'static str {
    match activity {
        ActivityId::Walk => "Vamos começar a caminhada. Respire fundo e siga no seu ritmo.",
        ActivityId::Run => "Corrida iniciada! Solte o corpo e libere essa endorfina.",
        ActivityId::Bike => "Hora de pedalar! Sinta o vento no rosto.",
        ActivityId::Relax => "Momento de autocuidado. Relaxe e respire devagar.",
    }
}

fn minutes_phrase(minutes: u64) -> String {
    if minutes == 1 {
        "1 minuto".to_string()
    } else {
        format!("{minutes} minutos")
    }
}

/// Newest 5-minute boundary reached by `elapsed_minutes`, if any.
pub fn milestone_boundary(elapsed_minutes: u64) -> Option<u64> {
    let boundary = elapsed_minutes - elapsed_minutes % MILESTONE_MINUTES;
    (boundary >= MILESTONE_MINUTES).then_some(boundary)
}
