use serde::Serialize;
use validator::Validate;

use crate::{MacroSplit, profile::validate_macro_split};

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterInput {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct GoalsInput {
    #[validate(range(min = 1, message = "Daily calories must be positive"))]
    pub target_daily_calories: u32,
    #[validate(custom(function = "validate_macro_split"))]
    pub target_macros_pct: MacroSplit,
}

/// Partial profile update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disliked_ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_cuisines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_daily_calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_macros_pct: Option<MacroSplit>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// Splits a comma-separated list, dropping blanks and surrounding spaces.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
