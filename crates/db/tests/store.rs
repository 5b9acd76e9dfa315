use mealmuse_db::SqliteStore;
use mealmuse_shared::{
    Error,
    meal::Meal,
    mealplan::MealPlan,
    store::{self, Collection, RecordStore},
};
use serde_json::json;
use temp_dir::TempDir;

async fn setup_store(dir: &TempDir) -> anyhow::Result<SqliteStore> {
    let path = dir.child("mealmuse.sqlite3");
    let url = format!("sqlite:{}", path.display());
    let pool = mealmuse_db::create_pool(&url, 1).await?;
    mealmuse_db::migrate(&pool).await?;

    Ok(SqliteStore::new(pool))
}

#[tokio::test]
async fn test_create_and_list_in_creation_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup_store(&dir).await?;

    for name in ["Tacos", "Nachos", "Burritos"] {
        store
            .create(Collection::Meals, json!({ "name": name }))
            .await?;
    }

    let meals = store::list::<Meal, _>(&store).await?;
    let names = meals.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();

    assert_eq!(names, vec!["Tacos", "Nachos", "Burritos"]);
    assert!(meals.iter().all(|m| m.id.len() == 26));
    assert!(store.list(Collection::MealPlans).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_merges_and_keeps_id() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup_store(&dir).await?;

    let plan: MealPlan = store::create(
        &store,
        &json!({
            "date": "2025-06-01",
            "meal_id": "a",
            "family_members": ["x", "y"],
            "meal_type": "dinner"
        }),
    )
    .await?;

    let updated: MealPlan =
        store::update(&store, &plan.id, &json!({ "meal_id": "b", "id": "nope" })).await?;

    assert_eq!(updated.id, plan.id);
    assert_eq!(updated.meal_id, "b");
    assert_eq!(updated.family_members, vec!["x".to_owned(), "y".to_owned()]);

    let listed = store::list::<MealPlan, _>(&store).await?;
    assert_eq!(listed, vec![updated]);

    Ok(())
}

#[tokio::test]
async fn test_update_missing_record() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup_store(&dir).await?;

    let result = store
        .update(Collection::Meals, "missing", json!({ "name": "x" }))
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup_store(&dir).await?;

    let meal = store
        .create(Collection::Meals, json!({ "name": "Tacos" }))
        .await?;
    let id = meal["id"].as_str().unwrap_or_default().to_owned();

    assert!(store.delete(Collection::Meals, &id).await?);
    assert!(!store.delete(Collection::Meals, &id).await?);
    assert!(store.list(Collection::Meals).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_collections_are_isolated() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup_store(&dir).await?;

    let meal = store
        .create(Collection::Meals, json!({ "name": "Tacos" }))
        .await?;
    let id = meal["id"].as_str().unwrap_or_default().to_owned();

    assert!(!store.delete(Collection::MealPlans, &id).await?);
    assert_eq!(store.list(Collection::Meals).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_migrate_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("mealmuse.sqlite3");
    let url = format!("sqlite:{}", path.display());
    let pool = mealmuse_db::create_pool(&url, 1).await?;

    mealmuse_db::migrate(&pool).await?;
    mealmuse_db::migrate(&pool).await?;

    Ok(())
}

#[tokio::test]
async fn test_drop_database() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("mealmuse.sqlite3");
    let url = format!("sqlite:{}", path.display());
    let pool = mealmuse_db::create_pool(&url, 1).await?;
    pool.close().await;

    assert!(mealmuse_db::drop_database(&url).await?);
    assert!(!path.exists());
    assert!(!mealmuse_db::drop_database(&url).await?);

    Ok(())
}
