use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;
use validator::Validate;

use crate::{de, meal::Meal};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Snack,
}

/// A meal assigned to one calendar day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealPlan {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(with = "crate::date::day_key")]
    pub date: Date,
    #[validate(length(min = 1))]
    pub meal_id: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub meal_type: MealType,
    #[serde(default, deserialize_with = "de::null_default")]
    pub family_members: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub skipped: bool,
}

/// Payload for a plan the store has not assigned an id to yet.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMealPlan {
    #[serde(with = "crate::date::day_key")]
    pub date: Date,
    pub meal_id: String,
    pub meal_type: MealType,
    pub family_members: Vec<String>,
}

/// Partial update applied to an existing plan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanChanges {
    pub meal_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_members: Option<Vec<String>>,
}

/// A meal together with the plan that puts it on the calendar.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedMeal {
    pub plan_id: String,
    pub date: Date,
    pub meal: Meal,
}

impl PlannedMeal {
    /// The same meal planned on two days is selected independently.
    pub fn selection_key(&self) -> (&str, &str) {
        (&self.meal.id, &self.plan_id)
    }
}
