use std::collections::BTreeMap;

use axum::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::StatusCode;
use tracing::debug;

use crate::utils::hiscores_utils::{
    activity_category, activity_table, mode_path, parse_number, skill_table, to_key,
    ActivityCategory,
};

use super::{
    models::{ActivityStat, IndexLite, SkillStat},
    Hiscores, HiscoresError, Player, RankingRow,
};

pub const DEFAULT_HISCORES_URL: &str = "https://secure.runescape.com";

lazy_static! {
    static ref ROW_REGEX: Regex =
        Regex::new(r#"(?s)<tr class="personal-hiscores__row[^"]*">(.*?)</tr>"#)
            .expect("Failed to parse regex");
    static ref CELL_REGEX: Regex =
        Regex::new(r#"(?s)<td[^>]*>(.*?)</td>"#).expect("Failed to parse regex");
    static ref TAG_REGEX: Regex = Regex::new(r#"<[^>]+>"#).expect("Failed to parse regex");
}

/// The Old School hiscores as published on the official site.
pub struct OfficialHiscores {
    client: reqwest::Client,
    base_url: String,
}

enum Table {
    Skill(usize),
    Activity(usize),
}

impl OfficialHiscores {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, mode: &str, resource: &str) -> Result<String, HiscoresError> {
        let path = mode_path(mode).ok_or_else(|| HiscoresError::InvalidMode(mode.to_string()))?;
        Ok(format!("{}/m={}/{}", self.base_url, path, resource))
    }

    async fn ranking_page(
        &self,
        table: Table,
        mode: &str,
        page: i64,
    ) -> Result<Vec<RankingRow>, HiscoresError> {
        if page < 1 {
            return Err(HiscoresError::InvalidPage(page));
        }

        let url = self.endpoint(mode, "overall")?;
        let skill = matches!(table, Table::Skill(_));
        let mut params = vec![("page", page.to_string())];
        match table {
            Table::Skill(index) => params.push(("table", index.to_string())),
            Table::Activity(index) => {
                params.push(("category_type", "1".to_string()));
                params.push(("table", index.to_string()));
            }
        }

        debug!("Fetching ranking page {} {:?}", url, params);
        let response = self.client.get(url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HiscoresError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_ranking_page(&body, skill)
    }
}

#[async_trait]
impl Hiscores for OfficialHiscores {
    async fn player(&self, rsn: &str, mode: &str) -> Result<Player, HiscoresError> {
        let url = self.endpoint(mode, "index_lite.json")?;

        debug!("Fetching player {} from {}", rsn, url);
        let response = self
            .client
            .get(url)
            .query(&[("player", rsn)])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(HiscoresError::PlayerNotFound),
            status if !status.is_success() => return Err(HiscoresError::Status(status.as_u16())),
            _ => {}
        }

        let body = response.text().await?;
        let document: IndexLite = serde_json::from_str(&body)?;

        Ok(player_from_index_lite(rsn, mode, document))
    }

    async fn skill_page(
        &self,
        skill: &str,
        mode: &str,
        page: i64,
    ) -> Result<Vec<RankingRow>, HiscoresError> {
        let table =
            skill_table(skill).ok_or_else(|| HiscoresError::InvalidSkill(skill.to_string()))?;
        self.ranking_page(Table::Skill(table), mode, page).await
    }

    async fn activity_page(
        &self,
        activity: &str,
        mode: &str,
        page: i64,
    ) -> Result<Vec<RankingRow>, HiscoresError> {
        let table = activity_table(activity)
            .ok_or_else(|| HiscoresError::InvalidActivity(activity.to_string()))?;
        self.ranking_page(Table::Activity(table), mode, page).await
    }
}

pub fn player_from_index_lite(rsn: &str, mode: &str, document: IndexLite) -> Player {
    let skills = document.skills.map(|skills| {
        skills
            .into_iter()
            .map(|skill| {
                (
                    to_key(&skill.name),
                    SkillStat {
                        rank: skill.rank,
                        level: skill.level,
                        xp: skill.xp,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>()
    });

    let (clues, bosses, activities) = match document.activities {
        Some(entries) => {
            let mut clues = BTreeMap::new();
            let mut bosses = BTreeMap::new();
            let mut activities = BTreeMap::new();

            for entry in entries {
                let key = to_key(&entry.name);
                let stat = ActivityStat {
                    rank: entry.rank,
                    score: entry.score,
                };
                match activity_category(&key) {
                    ActivityCategory::Clue => clues.insert(key, stat),
                    ActivityCategory::Minigame => activities.insert(key, stat),
                    ActivityCategory::Boss => bosses.insert(key, stat),
                };
            }

            (Some(clues), Some(bosses), Some(activities))
        }
        None => (None, None, None),
    };

    Player {
        name: rsn.to_string(),
        mode: mode.to_string(),
        skills,
        clues,
        bosses,
        activities,
    }
}

fn cell_text(cell: &str) -> String {
    TAG_REGEX
        .replace_all(cell, "")
        .replace("&#160;", " ")
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Reads the rows out of an `overall` ranking table. Skill tables have rank, name, level and
/// xp columns; activity tables have rank, name and score.
pub fn parse_ranking_page(body: &str, skill: bool) -> Result<Vec<RankingRow>, HiscoresError> {
    let mut rows = Vec::new();

    for row in ROW_REGEX.captures_iter(body) {
        let cells: Vec<String> = CELL_REGEX
            .captures_iter(&row[1])
            .map(|cell| cell_text(&cell[1]))
            .collect();

        let expected = if skill { 4 } else { 3 };
        if cells.len() < expected {
            return Err(HiscoresError::UnexpectedContent(format!(
                "ranking row has {} columns, expected {}",
                cells.len(),
                expected
            )));
        }

        let number = |index: usize| {
            parse_number(&cells[index]).ok_or_else(|| {
                HiscoresError::UnexpectedContent(format!("not a number: {}", cells[index]))
            })
        };

        let rank = number(0)?;
        let name = cells[1].clone();
        let row = if skill {
            RankingRow {
                name,
                rank,
                level: Some(number(2)?),
                xp: Some(number(3)?),
                score: None,
            }
        } else {
            RankingRow {
                name,
                rank,
                level: None,
                xp: None,
                score: Some(number(2)?),
            }
        };

        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKILL_PAGE: &str = r#"
<table>
<tbody>
<tr class="personal-hiscores__row">
<td class="right">
1
</td>
<td class="left">
<a href="overall?user=Lynx%A0Titan&amp;table=1">Lynx&#160;Titan</a>
</td>
<td class="right">
99
</td>
<td class="right">
200,000,000
</td>
</tr>
<tr class="personal-hiscores__row personal-hiscores__row--dead">
<td class="right">
2
</td>
<td class="left">
<img class="hiscore-hc-dead" src="hc.png"/><a href="overall?user=Hey&amp;table=1">Hey</a>
</td>
<td class="right">
99
</td>
<td class="right">
199,999,999
</td>
</tr>
</tbody>
</table>"#;

    const ACTIVITY_PAGE: &str = r#"
<tr class="personal-hiscores__row">
<td class="right">26</td>
<td class="left"><a href="overall?user=Tim&amp;category_type=1&amp;table=6">Tim</a></td>
<td class="right">4,521</td>
</tr>"#;

    #[test]
    fn parses_skill_rows() {
        let rows = parse_ranking_page(SKILL_PAGE, true).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Lynx Titan");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].level, Some(99));
        assert_eq!(rows[0].xp, Some(200_000_000));
        assert_eq!(rows[0].score, None);
        assert_eq!(rows[1].name, "Hey");
        assert_eq!(rows[1].xp, Some(199_999_999));
    }

    #[test]
    fn parses_activity_rows() {
        let rows = parse_ranking_page(ACTIVITY_PAGE, false).unwrap();

        assert_eq!(
            rows,
            vec![RankingRow {
                name: "Tim".to_string(),
                rank: 26,
                level: None,
                xp: None,
                score: Some(4521),
            }]
        );
    }

    #[test]
    fn page_without_rows_is_empty() {
        let rows = parse_ranking_page("<html><body>No players</body></html>", true).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn short_rows_are_rejected() {
        let error = parse_ranking_page(ACTIVITY_PAGE, true).unwrap_err();
        assert_eq!(error.kind(), "unexpected_content");
    }

    #[test]
    fn player_categories_are_split() {
        let document: IndexLite = serde_json::from_str(
            r#"{
                "skills": [
                    {"id": 0, "name": "Overall", "rank": 5, "level": 2277, "xp": 4600000000},
                    {"id": 1, "name": "Attack", "rank": 3, "level": 99, "xp": 200000000}
                ],
                "activities": [
                    {"id": 0, "name": "League Points", "rank": -1, "score": -1},
                    {"id": 6, "name": "Clue Scrolls (all)", "rank": 100, "score": 800},
                    {"id": 30, "name": "Kree'Arra", "rank": 12, "score": 3000}
                ]
            }"#,
        )
        .unwrap();

        let player = player_from_index_lite("zezima", "main", document);

        let skills = player.skills.as_ref().unwrap();
        assert_eq!(skills["overall"].xp, 4_600_000_000);
        assert_eq!(skills["attack"].level, 99);
        assert_eq!(player.clues.as_ref().unwrap()["clue_scrolls_all"].score, 800);
        assert_eq!(player.bosses.as_ref().unwrap()["kree_arra"].rank, 12);
        assert_eq!(player.activities.as_ref().unwrap()["league_points"].rank, -1);
        assert!(player.is_complete());
    }

    #[test]
    fn missing_activities_leave_player_incomplete() {
        let document: IndexLite = serde_json::from_str(
            r#"{"skills": [{"name": "Overall", "rank": 1, "level": 32, "xp": 1000}]}"#,
        )
        .unwrap();

        let player = player_from_index_lite("someone", "main", document);

        assert!(player.bosses.is_none());
        assert!(!player.is_complete());
    }

    #[tokio::test]
    async fn unknown_inputs_fail_before_any_request() {
        let hiscores = OfficialHiscores::new("http://127.0.0.1:9");

        let error = hiscores.skill_page("sailing", "main", 1).await.unwrap_err();
        assert_eq!(error.to_string(), "Invalid skill: sailing");

        let error = hiscores
            .activity_page("clue_scrolls_all", "casual", 1)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Invalid game mode: casual");

        let error = hiscores.skill_page("attack", "main", -2).await.unwrap_err();
        assert_eq!(error.kind(), "invalid_page");
    }
}
