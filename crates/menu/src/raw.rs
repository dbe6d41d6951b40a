use serde::{Deserialize, Serialize};

/// A scalar the backend encodes inconsistently: sometimes an integer,
/// sometimes a string, occasionally a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl LooseValue {
    /// Canonical string form: integers and booleans collapse to their digit
    /// form, strings are trimmed.
    pub fn as_code(&self) -> String {
        match self {
            LooseValue::Int(i) => i.to_string(),
            LooseValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            LooseValue::Str(s) => s.trim().to_string(),
        }
    }

    /// Interpret as a 0/1 flag; `1`, `"1"` and `true` are on.
    pub fn is_set(&self) -> bool {
        self.as_code() == "1"
    }
}

/// One raw menu record as the backend ships it.
///
/// Field naming is inconsistent across backend versions: the id arrives
/// under `id` or `menuId`, the sort key under `sort` or `sortOrder`, and the
/// enum-like fields are integers or strings depending on the endpoint. All
/// of that is tolerated here and canonicalized by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMenuRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub menu_id: Option<i64>,
    #[serde(default)]
    pub menu_name: String,
    #[serde(default)]
    pub parent_id: i64,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub is_frame: Option<LooseValue>,
    #[serde(default)]
    pub is_cache: Option<LooseValue>,
    #[serde(default)]
    pub menu_type: Option<LooseValue>,
    #[serde(default)]
    pub visible: Option<LooseValue>,
    #[serde(default)]
    pub status: Option<LooseValue>,
    #[serde(default)]
    pub perms: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub children: Vec<RawMenuRecord>,
}

impl RawMenuRecord {
    /// The record's identity, whichever field it arrived under.
    pub fn record_id(&self) -> Option<i64> {
        self.id.or(self.menu_id)
    }

    /// The record's sort key; missing keys default to 0.
    pub fn record_sort_key(&self) -> i64 {
        self.sort.or(self.sort_order).unwrap_or(0)
    }
}
