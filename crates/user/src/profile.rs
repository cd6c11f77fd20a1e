use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self {
            protein: 30,
            carbs: 40,
            fat: 30,
        }
    }
}

impl MacroSplit {
    pub fn total(&self) -> u64 {
        u64::from(self.protein) + u64::from(self.carbs) + u64::from(self.fat)
    }
}

pub(crate) fn validate_macro_split(split: &MacroSplit) -> Result<(), ValidationError> {
    if split.total() == 100 {
        return Ok(());
    }

    Err(ValidationError::new("macro_split")
        .with_message(format!("Macro percentages must add up to 100, got {}", split.total()).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    #[serde(default)]
    pub preferred_cuisines: BTreeSet<String>,
    #[serde(default = "default_daily_calories")]
    pub target_daily_calories: u32,
    #[serde(default)]
    pub target_macros_pct: MacroSplit,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            dietary_restrictions: BTreeSet::new(),
            allergies: BTreeSet::new(),
            disliked_ingredients: vec![],
            preferred_cuisines: BTreeSet::new(),
            target_daily_calories: default_daily_calories(),
            target_macros_pct: MacroSplit::default(),
        }
    }
}

fn default_daily_calories() -> u32 {
    2000
}

/// The signed-in user as returned by `GET /users/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile: Profile,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}
