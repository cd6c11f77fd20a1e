use indexmap::IndexMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time_mins: u32,
    #[serde(default)]
    pub cook_time_mins: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn total_time_mins(&self) -> u32 {
        self.prep_time_mins.saturating_add(self.cook_time_mins)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAssignment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

/// Meals of one day slot. The server may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(rename = "Breakfast", default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<MealAssignment>,
    #[serde(rename = "Lunch", default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<MealAssignment>,
    #[serde(rename = "Dinner", default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<MealAssignment>,
}

impl DayMeals {
    pub fn meal(&self, meal_type: MealType) -> Option<&MealAssignment> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_none() && self.lunch.is_none() && self.dinner.is_none()
    }
}

/// One generation batch as returned by `GET /meal-plans/`.
///
/// `dates` and `days` are keyed by the same opaque day key (`"Day1"`, ...).
/// Keys keep the order they have in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub dates: IndexMap<String, String>,
    #[serde(default)]
    pub days: IndexMap<String, DayMeals>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_meal_type_is_case_insensitive() {
        assert_eq!(MealType::from_str("breakfast").unwrap(), MealType::Breakfast);
        assert_eq!(MealType::from_str("LUNCH").unwrap(), MealType::Lunch);
        assert_eq!(MealType::from_str("Dinner").unwrap(), MealType::Dinner);
        assert!(MealType::from_str("brunch").is_err());
        assert_eq!(MealType::Lunch.to_string(), "Lunch");
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: MealPlanRecord = serde_json::from_value(serde_json::json!({
            "id": "65f0",
            "dates": {"Day1": "2024-03-10"},
            "days": {"Day1": {"Breakfast": {"name": "Oats"}}},
            "created_at": {"$date": 1710000000000u64}
        }))
        .unwrap();

        let day = &record.days["Day1"];
        assert_eq!(day.breakfast.as_ref().unwrap().name, "Oats");
        assert!(day.breakfast.as_ref().unwrap().recipe.is_none());
        assert!(day.lunch.is_none());
        assert!(day.dinner.is_none());

        let empty: MealPlanRecord = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.dates.is_empty());
        assert!(empty.days.is_empty());
    }

    #[test]
    fn test_recipe_fields_use_server_names() {
        let recipe: Recipe = serde_json::from_value(serde_json::json!({
            "description": "Warm porridge",
            "prepTimeMins": 5,
            "cookTimeMins": 10,
            "ingredients": [{"quantity": "1", "unit": "cup", "item": "oats"}],
            "instructions": ["Boil", "Stir"]
        }))
        .unwrap();

        assert_eq!(recipe.total_time_mins(), 15);
        assert_eq!(recipe.ingredients[0].item, "oats");
        assert!(recipe.ingredients[0].notes.is_none());
        assert_eq!(recipe.instructions.len(), 2);
    }
}
