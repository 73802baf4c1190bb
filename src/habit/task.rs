use serde::{Deserialize, Deserializer, Serialize};

fn default_active() -> bool {
    true
}

/// Accept both integer and fractional point values, rounding the latter
fn deserialize_points<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() {
        // `as` saturates at the i64 bounds
        Ok(value.round() as i64)
    } else {
        Ok(0)
    }
}

/// A habit the user checks off each day
///
/// Core tasks share a fixed 100-point pool and carry `points == 0`.
/// Bonus (non-core) tasks carry a fixed value in `1..=10`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable opaque identifier
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_points")]
    pub points: i64,
    #[serde(default)]
    pub is_core: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Task {
    pub fn is_active_core(&self) -> bool {
        self.is_active && self.is_core
    }
}

/// User-supplied fields for creating or editing a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub points: i64,
    pub is_core: bool,
}

impl TaskDraft {
    pub fn core(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            points: 0,
            is_core: true,
        }
    }

    pub fn bonus(title: impl Into<String>, points: i64) -> Self {
        Self {
            title: title.into(),
            points,
            is_core: false,
        }
    }
}
