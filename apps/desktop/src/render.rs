use shared::{
    catalog,
    protocol::{format_elapsed, SessionPhase, SessionReport, SessionSnapshot},
};

pub fn moods() -> String {
    catalog::MOODS
        .iter()
        .map(|mood| {
            format!(
                "  {} {:<10} {:<11} {}",
                mood.emoji,
                mood.id.as_str(),
                mood.label,
                mood.description,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn activities() -> String {
    catalog::ACTIVITIES
        .iter()
        .map(|activity| {
            format!(
                "  {} {:<6} {:<11} {}",
                activity.icon,
                activity.id.as_str(),
                activity.name,
                activity.description,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn snapshot(snapshot: &SessionSnapshot) -> String {
    let mood = snapshot
        .mood
        .map(|id| catalog::mood(id).label)
        .unwrap_or("-");
    let activity = snapshot
        .activity
        .map(|id| catalog::activity(id).name)
        .unwrap_or("-");

    match snapshot.phase {
        SessionPhase::CheckIn => "Como você está se sentindo hoje? (`moods`)".to_string(),
        SessionPhase::MoodChosen => {
            let content = snapshot
                .mood
                .map(catalog::motivational_content)
                .map(|content| format!("{}\n{}", content.message, content.tip))
                .unwrap_or_default();
            format!("[{mood}] {content}\n`next` para escolher a atividade")
        }
        SessionPhase::ActivityChoice => {
            "O que seu corpo está pedindo? (`activities`)".to_string()
        }
        SessionPhase::Active => {
            let state = if snapshot.paused { "pausado" } else { "em andamento" };
            format!(
                "[{mood}] {activity} {} ({state})",
                format_elapsed(snapshot.elapsed_secs)
            )
        }
        SessionPhase::Report => format!(
            "[{mood}] {activity} concluído em {}",
            format_elapsed(snapshot.final_elapsed_secs.unwrap_or_default())
        ),
    }
}

pub fn report(report: &SessionReport) -> String {
    format!(
        "Combinação perfeita! {} + {}\ntempo total: {} ({} pausa(s))\n{}\n{}",
        report.mood_label,
        report.activity_name,
        report.formatted_elapsed(),
        report.pause_count,
        report.headline,
        report.closing
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{ActivityId, MoodId};

    fn active(paused: bool) -> SessionSnapshot {
        SessionSnapshot {
            session_id: None,
            phase: SessionPhase::Active,
            mood: Some(MoodId::Calm),
            activity: Some(ActivityId::Walk),
            running: true,
            paused,
            elapsed_secs: 125,
            final_elapsed_secs: None,
            last_milestone_minutes: 0,
        }
    }

    #[test]
    fn active_snapshot_shows_clock_and_state() {
        assert_eq!(
            snapshot(&active(false)),
            "[Tranquilo] Caminhada 02:05 (em andamento)"
        );
        assert!(snapshot(&active(true)).ends_with("(pausado)"));
    }

    #[test]
    fn listings_cover_catalog() {
        assert_eq!(moods().lines().count(), catalog::MOODS.len());
        assert!(activities().contains("Caminhada"));
    }
}
