#![allow(dead_code)]

use mealmuse_shared::store::{Collection, InMemoryStore, RecordStore};
use serde_json::{Value, json};

pub async fn seed(store: &InMemoryStore, collection: Collection, data: Value) -> anyhow::Result<String> {
    let record = store.create(collection, data).await?;

    Ok(record["id"].as_str().unwrap_or_default().to_owned())
}

pub async fn meal(store: &InMemoryStore, name: &str) -> anyhow::Result<String> {
    seed(
        store,
        Collection::Meals,
        json!({
            "name": name,
            "ingredients": [{ "name": "Cheese", "amount": "1", "unit": "cup" }]
        }),
    )
    .await
}

pub async fn member(store: &InMemoryStore, name: &str) -> anyhow::Result<String> {
    seed(store, Collection::FamilyMembers, json!({ "name": name })).await
}

pub async fn plan(
    store: &InMemoryStore,
    date: &str,
    meal_id: &str,
    members: &[&str],
) -> anyhow::Result<String> {
    seed(
        store,
        Collection::MealPlans,
        json!({
            "date": date,
            "meal_id": meal_id,
            "meal_type": "dinner",
            "family_members": members,
        }),
    )
    .await
}
