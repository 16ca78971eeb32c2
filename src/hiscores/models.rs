use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillStat {
    pub rank: i64,
    pub level: i64,
    pub xp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStat {
    pub rank: i64,
    pub score: i64,
}

/// A player's hiscores entry. Every category is optional because the upstream may answer
/// with a partial document, see [`Player::is_complete`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<BTreeMap<String, SkillStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clues: Option<BTreeMap<String, ActivityStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bosses: Option<BTreeMap<String, ActivityStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<BTreeMap<String, ActivityStat>>,
}

impl Player {
    /// A player is only usable when both skills and bosses came back with data. A category
    /// that is present but empty counts as missing, which is stricter than a plain presence
    /// check.
    pub fn is_complete(&self) -> bool {
        let has_skills = self.skills.as_ref().is_some_and(|s| !s.is_empty());
        let has_bosses = self.bosses.as_ref().is_some_and(|b| !b.is_empty());
        has_skills && has_bosses
    }
}

/// One row of a skill or activity ranking page. Skill pages carry `level` and `xp`,
/// activity pages carry `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub name: String,
    pub rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

/// `index_lite.json` document.
#[derive(Debug, Deserialize)]
pub struct IndexLite {
    pub skills: Option<Vec<IndexLiteSkill>>,
    pub activities: Option<Vec<IndexLiteActivity>>,
}

#[derive(Debug, Deserialize)]
pub struct IndexLiteSkill {
    pub name: String,
    pub rank: i64,
    pub level: i64,
    pub xp: i64,
}

#[derive(Debug, Deserialize)]
pub struct IndexLiteActivity {
    pub name: String,
    pub rank: i64,
    pub score: i64,
}
