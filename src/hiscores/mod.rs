use axum::async_trait;
use thiserror::Error;

pub mod models;
pub mod official;

pub use models::{Player, RankingRow};
pub use official::OfficialHiscores;

#[derive(Error, Debug)]
pub enum HiscoresError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Hiscores responded with status {0}")]
    Status(u16),

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Invalid game mode: {0}")]
    InvalidMode(String),

    #[error("Invalid skill: {0}")]
    InvalidSkill(String),

    #[error("Invalid activity: {0}")]
    InvalidActivity(String),

    #[error("Invalid page: {0}")]
    InvalidPage(i64),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected page content: {0}")]
    UnexpectedContent(String),

    /// Raised by the scripted provider in tests, carries just a message.
    #[cfg(test)]
    #[error("{0}")]
    Scripted(String),
}

impl HiscoresError {
    pub fn kind(&self) -> &'static str {
        match self {
            HiscoresError::Http(_) => "http",
            HiscoresError::Status(_) => "status",
            HiscoresError::PlayerNotFound => "player_not_found",
            HiscoresError::InvalidMode(_) => "invalid_mode",
            HiscoresError::InvalidSkill(_) => "invalid_skill",
            HiscoresError::InvalidActivity(_) => "invalid_activity",
            HiscoresError::InvalidPage(_) => "invalid_page",
            HiscoresError::Json(_) => "json",
            HiscoresError::UnexpectedContent(_) => "unexpected_content",
            #[cfg(test)]
            HiscoresError::Scripted(_) => "scripted",
        }
    }
}

/// A source of hiscores data.
#[async_trait]
pub trait Hiscores: Send + Sync {
    async fn player(&self, rsn: &str, mode: &str) -> Result<Player, HiscoresError>;

    async fn skill_page(
        &self,
        skill: &str,
        mode: &str,
        page: i64,
    ) -> Result<Vec<RankingRow>, HiscoresError>;

    async fn activity_page(
        &self,
        activity: &str,
        mode: &str,
        page: i64,
    ) -> Result<Vec<RankingRow>, HiscoresError>;
}

#[cfg(test)]
pub mod testing {
    use std::{collections::BTreeMap, sync::Mutex};

    use super::*;
    use crate::hiscores::models::{ActivityStat, SkillStat};

    /// A recorded call: the operation name followed by its arguments.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Call {
        pub operation: &'static str,
        pub target: String,
        pub mode: String,
        pub page: Option<i64>,
    }

    pub type PlayerScript = fn(&str) -> Result<Player, HiscoresError>;
    pub type PageScript = fn(&str, i64) -> Result<Vec<RankingRow>, HiscoresError>;

    /// Answers every lookup from plain functions and records what was asked for.
    pub struct ScriptedHiscores {
        pub player: PlayerScript,
        pub page: PageScript,
        pub calls: Mutex<Vec<Call>>,
    }

    impl ScriptedHiscores {
        pub fn new(player: PlayerScript, page: PageScript) -> Self {
            Self {
                player,
                page,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, operation: &'static str, target: &str, mode: &str, page: Option<i64>) {
            self.calls.lock().unwrap().push(Call {
                operation,
                target: target.to_string(),
                mode: mode.to_string(),
                page,
            });
        }
    }

    #[async_trait]
    impl Hiscores for ScriptedHiscores {
        async fn player(&self, rsn: &str, mode: &str) -> Result<Player, HiscoresError> {
            self.record("player", rsn, mode, None);
            (self.player)(rsn)
        }

        async fn skill_page(
            &self,
            skill: &str,
            mode: &str,
            page: i64,
        ) -> Result<Vec<RankingRow>, HiscoresError> {
            self.record("skill_page", skill, mode, Some(page));
            (self.page)(skill, page)
        }

        async fn activity_page(
            &self,
            activity: &str,
            mode: &str,
            page: i64,
        ) -> Result<Vec<RankingRow>, HiscoresError> {
            self.record("activity_page", activity, mode, Some(page));
            (self.page)(activity, page)
        }
    }

    pub fn complete_player(rsn: &str) -> Player {
        let mut skills = BTreeMap::new();
        skills.insert(
            "attack".to_string(),
            SkillStat {
                rank: 1,
                level: 99,
                xp: 200_000_000,
            },
        );
        let mut bosses = BTreeMap::new();
        bosses.insert(
            "zulrah".to_string(),
            ActivityStat {
                rank: 10,
                score: 1500,
            },
        );

        Player {
            name: rsn.to_string(),
            mode: "main".to_string(),
            skills: Some(skills),
            clues: None,
            bosses: Some(bosses),
            activities: None,
        }
    }

    pub fn ranking_rows(count: usize) -> Vec<RankingRow> {
        (0..count)
            .map(|i| RankingRow {
                name: format!("player {}", i + 1),
                rank: i as i64 + 1,
                level: None,
                xp: None,
                score: Some(1000 - i as i64),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_kinds() {
        let error = HiscoresError::Scripted("not found".to_string());
        assert_eq!(error.to_string(), "not found");
        assert_eq!(error.kind(), "scripted");

        assert_eq!(HiscoresError::PlayerNotFound.to_string(), "Player not found");
        assert_eq!(HiscoresError::InvalidPage(-3).kind(), "invalid_page");
    }
}
