//! Read-only dashboard dataset: recent workouts and the friends ranking.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    catalog,
    domain::{ActivityId, MoodId},
};

const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub date: NaiveDate,
    pub activity: ActivityId,
    pub mood: MoodId,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub points: u32,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub name: String,
    pub points: u32,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub position: u32,
    pub name: String,
    pub avatar: String,
    pub points: u32,
    pub streak: u32,
    pub is_current_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentWorkoutView {
    pub id: String,
    pub date_label: String,
    pub activity: String,
    pub activity_icon: String,
    pub mood: String,
    pub mood_emoji: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub user: UserStats,
    pub rank: u32,
    pub recent_workouts: Vec<RecentWorkoutView>,
    pub ranking: Vec<RankingEntry>,
}

/// Injected reference data behind the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub history: Vec<WorkoutRecord>,
    pub friends: Vec<Friend>,
    pub user: UserStats,
}

impl DashboardData {
    pub fn sample() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self {
            history: vec![
                WorkoutRecord {
                    id: "1".into(),
                    date: date(2025, 6, 13),
                    activity: ActivityId::Run,
                    mood: MoodId::Energized,
                    duration_minutes: 25,
                },
                WorkoutRecord {
                    id: "2".into(),
                    date: date(2025, 6, 12),
                    activity: ActivityId::Walk,
                    mood: MoodId::Calm,
                    duration_minutes: 35,
                },
                WorkoutRecord {
                    id: "3".into(),
                    date: date(2025, 6, 11),
                    activity: ActivityId::Relax,
                    mood: MoodId::Tired,
                    duration_minutes: 20,
                },
            ],
            friends: vec![
                friend("1", "Ana", 1250, 7),
                friend("2", "Carlos", 1180, 5),
                friend("3", "Maria", 980, 12),
                friend("4", "João", 850, 3),
            ],
            user: UserStats {
                name: "Você".into(),
                points: 1100,
                streak: 4,
            },
        }
    }

    /// Friends plus the current user, highest points first. Ties keep
    /// insertion order with the user placed after friends.
    pub fn ranking(&self) -> Vec<RankingEntry> {
        let mut entries: Vec<RankingEntry> = self
            .friends
            .iter()
            .map(|friend| RankingEntry {
                position: 0,
                name: friend.name.clone(),
                avatar: friend.avatar.clone(),
                points: friend.points,
                streak: friend.streak,
                is_current_user: false,
                medal: None,
            })
            .collect();
        entries.push(RankingEntry {
            position: 0,
            name: self.user.name.clone(),
            avatar: initial(&self.user.name),
            points: self.user.points,
            streak: self.user.streak,
            is_current_user: true,
            medal: None,
        });

        entries.sort_by(|a, b| b.points.cmp(&a.points));
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.position = index as u32 + 1;
            entry.medal = match entry.position {
                1 => Some(Medal::Gold),
                2 => Some(Medal::Silver),
                3 => Some(Medal::Bronze),
                _ => None,
            };
        }
        entries
    }

    pub fn view(&self) -> DashboardView {
        let ranking = self.ranking();
        let rank = ranking
            .iter()
            .find(|entry| entry.is_current_user)
            .map(|entry| entry.position)
            .unwrap_or_default();
        let recent_workouts = self
            .history
            .iter()
            .map(|record| {
                let activity = catalog::activity(record.activity);
                let mood = catalog::mood(record.mood);
                RecentWorkoutView {
                    id: record.id.clone(),
                    date_label: format_short_date(record.date),
                    activity: activity.name.to_string(),
                    activity_icon: activity.icon.to_string(),
                    mood: mood.label.to_string(),
                    mood_emoji: mood.emoji.to_string(),
                    duration_minutes: record.duration_minutes,
                }
            })
            .collect();

        DashboardView {
            user: self.user.clone(),
            rank,
            recent_workouts,
            ranking,
        }
    }
}

/// `13 de jun.` style label used by the recent-activity list.
pub fn format_short_date(date: NaiveDate) -> String {
    let month = PT_BR_MONTHS[date.month0() as usize];
    format!("{:02} de {month}.", date.day())
}

fn friend(id: &str, name: &str, points: u32, streak: u32) -> Friend {
    Friend {
        id: id.into(),
        name: name.into(),
        avatar: initial(name),
        points,
        streak,
    }
}

fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
