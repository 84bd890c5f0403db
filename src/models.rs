use serde::{Deserialize, Serialize};

use crate::services::cache::SeoCache;
use crate::services::store::StoreClient;
use crate::services::template::Shell;
use crate::services::user_store::UserDataStore;

/// Application state shared across all handlers
pub struct AppState {
    pub shell: Shell,
    pub store: Option<StoreClient>,
    pub cache: SeoCache,
    pub users: UserDataStore,
    pub site_url: String,
    pub asset_dir: String,
}

/// Generation mode, one variant per tool family.
///
/// A closed enum rather than a string-keyed table: adding a mode is a
/// compile-checked extension of every `match` on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorMode {
    Range,
    Lottery,
    List,
    Shuffle,
    Ticket,
    Password,
    Dice,
    Coin,
    Prime,
    Fraction,
    Roman,
}

impl GeneratorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "range" => Some(GeneratorMode::Range),
            "lottery" => Some(GeneratorMode::Lottery),
            "list" => Some(GeneratorMode::List),
            "shuffle" => Some(GeneratorMode::Shuffle),
            "ticket" => Some(GeneratorMode::Ticket),
            "password" => Some(GeneratorMode::Password),
            "dice" => Some(GeneratorMode::Dice),
            "coin" => Some(GeneratorMode::Coin),
            "prime" => Some(GeneratorMode::Prime),
            "fraction" => Some(GeneratorMode::Fraction),
            "roman" => Some(GeneratorMode::Roman),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorMode::Range => "range",
            GeneratorMode::Lottery => "lottery",
            GeneratorMode::List => "list",
            GeneratorMode::Shuffle => "shuffle",
            GeneratorMode::Ticket => "ticket",
            GeneratorMode::Password => "password",
            GeneratorMode::Dice => "dice",
            GeneratorMode::Coin => "coin",
            GeneratorMode::Prime => "prime",
            GeneratorMode::Fraction => "fraction",
            GeneratorMode::Roman => "roman",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    None,
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvantageMode {
    Normal,
    Advantage,
    Disadvantage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharsetKind {
    Numeric,
    Hex,
    Alphanumeric,
    Strong,
    Custom,
}

/// One lottery pool: draw `pick` unique values from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolSpec {
    pub min: i64,
    pub max: i64,
    pub pick: i64,
}

/// A single generated value. Untagged so JSON round-trips as plain
/// numbers/strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ResultValue {
    pub fn as_text(&self) -> String {
        match self {
            ResultValue::Int(n) => n.to_string(),
            ResultValue::Float(f) => f.to_string(),
            ResultValue::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for ResultValue {
    fn from(n: i64) -> Self {
        ResultValue::Int(n)
    }
}

impl From<f64> for ResultValue {
    fn from(f: f64) -> Self {
        ResultValue::Float(f)
    }
}

impl From<&str> for ResultValue {
    fn from(s: &str) -> Self {
        ResultValue::Text(s.to_string())
    }
}

impl From<String> for ResultValue {
    fn from(s: String) -> Self {
        ResultValue::Text(s)
    }
}

/// Sparse, validated generation parameters. Absent fields fall back to
/// generator-specific defaults; anything reaching a generator has already
/// passed `validation::validate_generator_params`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice_sides: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roman_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensure_each: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_ambiguous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDir>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advantage: Option<AdvantageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<CharsetKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_chars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_chars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_a: Option<PoolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_b: Option<PoolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice_custom_faces: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_labels: Option<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_remaining: Option<Vec<ResultValue>>,
}

/// Uniform output of every generator mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub values: Vec<ResultValue>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bonus_values: Vec<ResultValue>,
    pub formatted: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// UI hints attached to a tool config.
#[derive(Debug, Clone, Serialize)]
pub struct ToolUi {
    pub show_inputs: bool,
    pub result_type: &'static str,
    pub button_text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

/// Build-time tool descriptor, keyed by slug. Defined once in the registry
/// and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ToolConfig {
    pub slug: &'static str,
    pub title: &'static str,
    pub seo_title: &'static str,
    pub description: &'static str,
    pub mode: GeneratorMode,
    pub params: GeneratorParams,
    pub ui: ToolUi,
    pub keywords: &'static [&'static str],
    pub priority: f32,
    pub category: &'static str,
    pub faq: &'static [(&'static str, &'static str)],
}

/// Backing-store record mapping a pSEO slug to generation parameters and
/// an indexing flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub allow_indexing: bool,
}

/// Backing-store SEO template, keyed by keyword `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title_template: String,
    #[serde(default)]
    pub meta_desc: String,
    #[serde(default)]
    pub content_top: String,
    #[serde(default)]
    pub content_bottom: String,
}

/// A favorited or recently-used tool. `key` is the canonicalized pathname
/// and the dedup identity; `saved_at` is added-at for favorites and
/// used-at for recents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub key: String,
    pub href: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub saved_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub save: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub key: String,
}
