//! Static mood/activity reference set shown by the check-in flow.

use crate::domain::{Activity, ActivityId, Mood, MoodId, MotivationalContent};

pub const MOODS: [Mood; 6] = [
    Mood {
        id: MoodId::Energized,
        emoji: "⚡",
        label: "Energizado",
        description: "Cheio de energia!",
    },
    Mood {
        id: MoodId::Motivated,
        emoji: "💪",
        label: "Motivado",
        description: "Pronto para o desafio",
    },
    Mood {
        id: MoodId::Calm,
        emoji: "😌",
        label: "Tranquilo",
        description: "Em paz comigo mesmo",
    },
    Mood {
        id: MoodId::Tired,
        emoji: "😴",
        label: "Cansado",
        description: "Preciso de energia",
    },
    Mood {
        id: MoodId::Stressed,
        emoji: "😰",
        label: "Estressado",
        description: "Preciso relaxar",
    },
    Mood {
        id: MoodId::Sad,
        emoji: "😔",
        label: "Triste",
        description: "Não tô no meu melhor",
    },
];

pub const ACTIVITIES: [Activity; 4] = [
    Activity {
        id: ActivityId::Walk,
        icon: "🚶‍♀️",
        name: "Caminhada",
        description: "Vamos devagar e com calma",
    },
    Activity {
        id: ActivityId::Run,
        icon: "🏃‍♀️",
        name: "Corrida",
        description: "Liberar endorfina!",
    },
    Activity {
        id: ActivityId::Bike,
        icon: "🚴‍♀️",
        name: "Ciclismo",
        description: "Sentir o vento no rosto",
    },
    Activity {
        id: ActivityId::Relax,
        icon: "🧘‍♀️",
        name: "Só relaxar",
        description: "Hoje é dia de autocuidado",
    },
];

// MOODS and ACTIVITIES are declared in enum order.
pub fn mood(id: MoodId) -> Mood {
    MOODS[id as usize]
}

pub fn activity(id: ActivityId) -> Activity {
    ACTIVITIES[id as usize]
}

/// Looks a mood up by slug or display label, case-insensitively.
pub fn find_mood(query: &str) -> Option<Mood> {
    let query = query.trim();
    MOODS.iter().copied().find(|mood| {
        mood.id.as_str().eq_ignore_ascii_case(query) || mood.label.eq_ignore_ascii_case(query)
    })
}

pub fn find_activity(query: &str) -> Option<Activity> {
    let query = query.trim();
    ACTIVITIES.iter().copied().find(|activity| {
        activity.id.as_str().eq_ignore_ascii_case(query)
            || activity.name.eq_ignore_ascii_case(query)
    })
}

pub fn motivational_content(id: MoodId) -> MotivationalContent {
    match id {
        MoodId::Energized => MotivationalContent {
            message: "Que energia incrível! Vamos canalizar isso numa atividade que você ama? 🔥",
            tip: "Aproveite essa disposição para tentar algo novo hoje!",
        },
        MoodId::Motivated => MotivationalContent {
            message: "Sinto essa motivação daqui! Bora transformar ela em movimento? 💫",
            tip: "Você está no momento perfeito para superar seus limites.",
        },
        MoodId::Calm => MotivationalContent {
            message: "Que tranquilidade boa! Uma atividade leve pode ser perfeita agora. ☀️",
            tip: "Mantenha esse equilíbrio com algo que te conecte com você mesmo.",
        },
        MoodId::Tired => MotivationalContent {
            message: "Respira fundo. Às vezes uma caminhada leve é tudo que precisamos. 🌱",
            tip: "Movimento suave pode te dar a energia que você busca.",
        },
        MoodId::Stressed => MotivationalContent {
            message: "Sinto que você precisa de um reset. Que tal clarear a mente? 🌊",
            tip: "O movimento pode ser seu melhor amigo para liberar essa tensão.",
        },
        MoodId::Sad => MotivationalContent {
            message: "Hoje tá puxado? A gente vai devagar juntos. Você não está sozinho. 🤗",
            tip: "Um passo de cada vez. O movimento pode trazer um pouquinho de luz.",
        },
    }
}

/// Motivational content for a raw mood slug; unknown slugs get the calm text.
pub fn motivational_content_for(slug: &str) -> MotivationalContent {
    slug.parse::<MoodId>()
        .map(motivational_content)
        .unwrap_or_else(|_| motivational_content(MoodId::Calm))
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
