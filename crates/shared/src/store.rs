use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use ulid::Ulid;

use crate::{
    Error, Result,
    family::{FamilyMember, FamilyPreferences},
    meal::Meal,
    mealplan::MealPlan,
};

#[derive(
    EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    FamilyMembers,
    FamilyPreferences,
    Meals,
    MealPlans,
}

/// Table storage of schemaless JSON records, one namespace per collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Stores `data` under a fresh id and returns the stored record.
    async fn create(&self, collection: Collection, data: Value) -> Result<Value>;

    /// Merges the top-level fields of `data` into the record.
    async fn update(&self, collection: Collection, id: &str, data: Value) -> Result<Value>;

    /// Returns whether a record was removed.
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool>;
}

/// A typed view over one collection.
pub trait Record: DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Structural check applied when reading. Input rules such as length
    /// limits belong to `Validate` and only run on writes.
    fn check(&self) -> std::result::Result<(), &'static str> {
        Ok(())
    }
}

impl Record for FamilyMember {
    const COLLECTION: Collection = Collection::FamilyMembers;

    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> std::result::Result<(), &'static str> {
        if self.name.is_empty() {
            return Err("missing name");
        }

        Ok(())
    }
}

impl Record for FamilyPreferences {
    const COLLECTION: Collection = Collection::FamilyPreferences;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Meal {
    const COLLECTION: Collection = Collection::Meals;

    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> std::result::Result<(), &'static str> {
        if self.name.is_empty() {
            return Err("missing name");
        }

        if self.ingredients.iter().any(|i| i.name.is_empty()) {
            return Err("ingredient without a name");
        }

        Ok(())
    }
}

impl Record for MealPlan {
    const COLLECTION: Collection = Collection::MealPlans;

    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> std::result::Result<(), &'static str> {
        if self.meal_id.is_empty() {
            return Err("missing meal_id");
        }

        Ok(())
    }
}

pub fn decode<T: Record>(value: Value) -> Result<T> {
    let record: T = serde_json::from_value(value).map_err(|e| Error::Decode {
        collection: T::COLLECTION,
        reason: e.to_string(),
    })?;

    let shape = if record.id().is_empty() {
        Err("missing id")
    } else {
        record.check()
    };

    if let Err(reason) = shape {
        return Err(Error::Decode {
            collection: T::COLLECTION,
            reason: reason.to_owned(),
        });
    }

    Ok(record)
}

pub async fn list<T, S>(store: &S) -> Result<Vec<T>>
where
    T: Record,
    S: RecordStore + ?Sized,
{
    store
        .list(T::COLLECTION)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

pub async fn create<T, S>(store: &S, data: &(impl Serialize + Sync)) -> Result<T>
where
    T: Record,
    S: RecordStore + ?Sized,
{
    let value = serde_json::to_value(data)?;
    decode(store.create(T::COLLECTION, value).await?)
}

pub async fn update<T, S>(store: &S, id: &str, changes: &(impl Serialize + Sync)) -> Result<T>
where
    T: Record,
    S: RecordStore + ?Sized,
{
    let value = serde_json::to_value(changes)?;
    decode(store.update(T::COLLECTION, id, value).await?)
}

pub async fn delete<T, S>(store: &S, id: &str) -> Result<bool>
where
    T: Record,
    S: RecordStore + ?Sized,
{
    store.delete(T::COLLECTION, id).await
}

pub fn into_object(collection: Collection, data: Value) -> Result<Map<String, Value>> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(Error::Decode {
            collection,
            reason: format!("expected an object, got {other}"),
        }),
    }
}

/// Shallow merge used by every store's `update`. The id is never overwritten.
pub fn merge(record: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        if key == "id" {
            continue;
        }
        record.insert(key, value);
    }
}

pub fn new_id() -> String {
    Ulid::new().to_string()
}

/// In-memory implementation for development and testing
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<Collection, Vec<Map<String, Value>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let records = self
            .records
            .read()
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(records
            .get(&collection)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default())
    }

    async fn create(&self, collection: Collection, data: Value) -> Result<Value> {
        let mut record = into_object(collection, data)?;
        record.insert("id".to_owned(), Value::String(new_id()));

        let mut records = self
            .records
            .write()
            .map_err(|e| Error::Server(e.to_string()))?;
        records.entry(collection).or_default().push(record.clone());

        Ok(Value::Object(record))
    }

    async fn update(&self, collection: Collection, id: &str, data: Value) -> Result<Value> {
        let changes = into_object(collection, data)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| Error::Server(e.to_string()))?;

        let Some(record) = records
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
        else {
            crate::not_found!("{} record {}", collection, id);
        };

        merge(record, changes);

        Ok(Value::Object(record.clone()))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|e| Error::Server(e.to_string()))?;

        let Some(rows) = records.get_mut(&collection) else {
            return Ok(false);
        };

        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));

        Ok(rows.len() != before)
    }
}

fn row_id(row: &Map<String, Value>) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_id() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let record = store
            .create(Collection::Meals, json!({ "name": "Tacos", "id": "ignored" }))
            .await?;

        let id = record["id"].as_str().unwrap();
        assert_ne!(id, "ignored");
        assert_eq!(store.list(Collection::Meals).await?.len(), 1);
        assert!(store.list(Collection::MealPlans).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_merges_fields() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let record = store
            .create(
                Collection::MealPlans,
                json!({ "date": "2025-06-01", "meal_id": "a", "family_members": ["x"] }),
            )
            .await?;
        let id = record["id"].as_str().unwrap().to_owned();

        let updated = store
            .update(Collection::MealPlans, &id, json!({ "meal_id": "b", "id": "other" }))
            .await?;

        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["meal_id"], "b");
        assert_eq!(updated["family_members"], json!(["x"]));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = InMemoryStore::new();
        let result = store
            .update(Collection::Meals, "missing", json!({ "name": "x" }))
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() -> anyhow::Result<()> {
        let store = InMemoryStore::new();

        assert!(!store.delete(Collection::Meals, "missing").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_typed_list_fails_on_malformed_record() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        store
            .create(Collection::Meals, json!({ "name": "Tacos" }))
            .await?;
        store
            .create(Collection::Meals, json!({ "name": "" }))
            .await?;

        let result = list::<Meal, _>(&store).await;

        assert!(matches!(
            result,
            Err(Error::Decode {
                collection: Collection::Meals,
                ..
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_typed_list_skips_input_limits() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let long_name = "Maximilian Alexander Fitzgerald-Montgomery the Third";
        store
            .create(
                Collection::FamilyMembers,
                json!({ "name": long_name, "age": 200 }),
            )
            .await?;
        store
            .create(
                Collection::MealPlans,
                json!({ "date": "2025-06-01", "meal_id": "m1" }),
            )
            .await?;

        let members = list::<FamilyMember, _>(&store).await?;

        assert!(long_name.len() > 50);
        assert_eq!(members[0].name, long_name);
        assert_eq!(members[0].age, Some(200));
        assert_eq!(list::<MealPlan, _>(&store).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_typed_list_rejects_blank_references() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        store
            .create(
                Collection::MealPlans,
                json!({ "date": "2025-06-01", "meal_id": "" }),
            )
            .await?;
        store
            .create(Collection::FamilyMembers, json!({ "name": "" }))
            .await?;

        assert!(list::<MealPlan, _>(&store).await.is_err());
        assert!(list::<FamilyMember, _>(&store).await.is_err());

        Ok(())
    }

    #[test]
    fn test_decode_rejects_missing_id() {
        let result = decode::<Meal>(json!({ "name": "Tacos" }));

        assert!(matches!(result, Err(Error::Decode { reason, .. }) if reason == "missing id"));
    }

    #[tokio::test]
    async fn test_create_rejects_non_object() {
        let store = InMemoryStore::new();
        let result = store.create(Collection::Meals, json!(["Tacos"])).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::FamilyMembers.to_string(), "family_members");
        assert_eq!(Collection::MealPlans.as_ref(), "meal_plans");
    }
}
