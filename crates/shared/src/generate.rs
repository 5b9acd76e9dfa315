use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    Error, Result, de,
    meal::{Complexity, Ingredient, Meal},
    store::Collection,
};

/// External LLM capability returning JSON that matches `schema`.
#[async_trait]
pub trait MealGenerator: Send + Sync {
    async fn invoke(&self, prompt: &str, schema: &Value) -> Result<Value>;
}

/// Lightweight suggestion shown before the user commits to a full meal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealSuggestion {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub cuisine_type: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub complexity_level: Complexity,
    #[serde(default, deserialize_with = "de::whole_number")]
    pub prep_time: u32,
    #[serde(default, deserialize_with = "de::whole_number")]
    pub cook_time: u32,
    #[serde(default, deserialize_with = "de::null_default")]
    pub can_prepare_ahead: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub main_ingredients: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub equipment_needed: Vec<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub tags: Vec<String>,
}

/// Servings given to a meal saved straight from a suggestion.
pub const SUGGESTION_SERVINGS: u16 = 4;

impl MealSuggestion {
    /// Turns the suggestion into a meal record. Each main ingredient becomes
    /// one portion and the instructions stay a single placeholder step.
    pub fn into_meal(self) -> Meal {
        let ingredients = self
            .main_ingredients
            .into_iter()
            .map(|name| Ingredient::new(name, "1", "portion"))
            .collect();

        Meal {
            id: String::new(),
            instructions: vec![format!(
                "Prepare {} according to your preferred method.",
                self.name
            )],
            name: self.name,
            cuisine_type: self.cuisine_type,
            complexity_level: self.complexity_level,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: SUGGESTION_SERVINGS,
            can_prepare_ahead: self.can_prepare_ahead,
            is_favorite: false,
            ingredients,
            equipment_needed: self.equipment_needed,
            tags: self.tags,
        }
    }
}

#[derive(Deserialize)]
struct Suggestions {
    #[serde(default, deserialize_with = "de::null_default")]
    meals: Vec<MealSuggestion>,
}

pub fn meal_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "cuisine_type": { "type": "string" },
            "complexity_level": { "type": "string", "enum": ["easy", "moderate", "difficult"] },
            "prep_time": { "type": "integer" },
            "cook_time": { "type": "integer" },
            "servings": { "type": "integer" },
            "can_prepare_ahead": { "type": "boolean" },
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "amount": { "type": "string" },
                        "unit": { "type": "string" }
                    }
                }
            },
            "instructions": { "type": "array", "items": { "type": "string" } },
            "equipment_needed": { "type": "array", "items": { "type": "string" } },
            "tags": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["name", "ingredients", "instructions"]
    })
}

pub fn suggestions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "meals": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "cuisine_type": { "type": "string" },
                        "complexity_level": { "type": "string", "enum": ["easy", "moderate", "difficult"] },
                        "prep_time": { "type": "integer" },
                        "cook_time": { "type": "integer" },
                        "can_prepare_ahead": { "type": "boolean" },
                        "description": { "type": "string" },
                        "main_ingredients": { "type": "array", "items": { "type": "string" } },
                        "equipment_needed": { "type": "array", "items": { "type": "string" } },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        },
        "required": ["meals"]
    })
}

/// Validates a generated meal. Any id the model made up is discarded so the
/// store assigns its own.
pub fn parse_meal(value: Value) -> Result<Meal> {
    let mut meal: Meal = serde_json::from_value(value).map_err(|e| Error::Decode {
        collection: Collection::Meals,
        reason: e.to_string(),
    })?;
    meal.id.clear();
    meal.validate()?;

    Ok(meal)
}

pub fn parse_suggestions(value: Value) -> Result<Vec<MealSuggestion>> {
    let suggestions: Suggestions = serde_json::from_value(value).map_err(|e| Error::Decode {
        collection: Collection::Meals,
        reason: e.to_string(),
    })?;

    for suggestion in &suggestions.meals {
        suggestion.validate()?;
    }

    Ok(suggestions.meals)
}

pub async fn suggest_meals<G: MealGenerator + ?Sized>(
    generator: &G,
    prompt: &str,
) -> Result<Vec<MealSuggestion>> {
    let value = generator.invoke(prompt, &suggestions_schema()).await?;
    parse_suggestions(value)
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    prompt: &'a str,
    response_json_schema: &'a Value,
}

/// Calls an LLM invocation endpoint over HTTP.
pub struct HttpMealGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpMealGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl MealGenerator for HttpMealGenerator {
    async fn invoke(&self, prompt: &str, schema: &Value) -> Result<Value> {
        let mut request = self.http.post(&self.endpoint).json(&InvokeRequest {
            prompt,
            response_json_schema: schema,
        });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(endpoint = %self.endpoint, "invoking meal generator");

        let resp = request.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            crate::bail!("meal generator returned {}: {}", status, body);
        }

        Ok(resp.json().await?)
    }
}
