use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Gaming platform a career profile is read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Pc,
    Console,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Console => "console",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stats filter. No game mode means both modes are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Competitive,
    Quickplay,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Competitive => "competitive",
            GameMode::Quickplay => "quickplay",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hit of a player name search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSearchResult {
    /// Identifier usable in player endpoints (e.g. "Prometheus-1252")
    pub player_id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub namecard: Option<String>,
    pub title: Option<String>,
    pub career_url: Option<String>,
    pub blizzard_id: Option<String>,
    pub last_updated_at: Option<Value>,
    /// Remaining upstream fields, forwarded untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<PlayerSearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub namecard: Option<String>,
    pub title: Option<String>,
    pub endorsement: Option<Endorsement>,
    pub competitive: Option<CompetitiveByPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<String>,
    /// Unix timestamp of the last profile refresh on Blizzard's side
    pub last_updated_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endorsement {
    pub level: Option<u32>,
    pub frame: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitiveByPlatform {
    pub pc: Option<CompetitiveData>,
    pub console: Option<CompetitiveData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current season ranks, one entry per role queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveData {
    pub season: Option<u32>,
    pub tank: Option<CompetitiveRank>,
    pub damage: Option<CompetitiveRank>,
    pub support: Option<CompetitiveRank>,
    pub open: Option<CompetitiveRank>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveRank {
    pub skill_rating: Option<u32>,
    pub division: Option<String>,
    pub tier: Option<u32>,
    pub role_icon: Option<String>,
    pub rank_icon: Option<String>,
    pub tier_icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// platform -> gamemode -> stats. Any level may be null.
pub type PlayerStats = BTreeMap<String, Option<PlatformStats>>;

pub type PlatformStats = BTreeMap<String, Option<GameModeStats>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameModeStats {
    pub general: Option<GeneralStats>,
    pub roles: Option<BTreeMap<String, RoleStats>>,
    pub heroes_comparisons: Option<BTreeMap<String, Option<ComparisonData>>>,
    /// Keyed by hero name, plus "all-heroes"
    pub career_stats: Option<BTreeMap<String, Option<Vec<CareerStatCategory>>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralStats {
    pub time_played: Option<u64>,
    pub games_played: Option<u64>,
    pub games_won: Option<u64>,
    pub games_lost: Option<u64>,
    pub winrate: Option<f64>,
    pub kda: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleStats {
    pub time_played: Option<u64>,
    pub games_played: Option<u64>,
    pub games_won: Option<u64>,
    pub winrate: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonData {
    pub label: String,
    pub values: Vec<ComparisonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonValue {
    pub hero: String,
    pub value: Number,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerStatCategory {
    pub category: String,
    pub label: String,
    pub stats: Vec<CareerStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerStat {
    pub key: String,
    pub label: String,
    pub value: StatValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(Number),
    Text(String),
}

/// Combined career profile as returned by the upstream player endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullPlayerData {
    pub summary: PlayerSummary,
    pub stats: Option<PlayerStats>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
