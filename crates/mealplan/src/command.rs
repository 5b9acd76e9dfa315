use mealmuse_shared::{
    family::{FamilyMember, FamilyMemberChanges, FamilyPreferences},
    generate::{self, MealGenerator, MealSuggestion},
    meal::Meal,
    mealplan::MealPlan,
    store::{self, Record, RecordStore},
};
use serde_json::{Value, json};
use time::Date;
use validator::Validate;

use crate::{
    assign::assign_meal,
    drag::{ChangeSet, PlanUpsert, apply_drag_move},
};

/// Everything the calendar needs, read from the store in one pass.
#[derive(Debug, Clone, Default)]
pub struct Household {
    pub plans: Vec<MealPlan>,
    pub meals: Vec<Meal>,
    pub family: Vec<FamilyMember>,
    pub preferences: Option<FamilyPreferences>,
}

#[derive(Clone)]
pub struct Command<S: RecordStore>(pub S);

impl<S: RecordStore> Command<S> {
    pub async fn load(&self) -> mealmuse_shared::Result<Household> {
        let plans = store::list::<MealPlan, _>(&self.0).await?;
        let meals = store::list::<Meal, _>(&self.0).await?;
        let family = store::list::<FamilyMember, _>(&self.0).await?;
        let preferences = store::list::<FamilyPreferences, _>(&self.0)
            .await?
            .into_iter()
            .next();

        Ok(Household {
            plans,
            meals,
            family,
            preferences,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn move_meal(&self, source: Date, dest: Date) -> mealmuse_shared::Result<Vec<MealPlan>> {
        let plans = store::list::<MealPlan, _>(&self.0).await?;
        let changes = apply_drag_move(source, dest, &plans);

        if changes.is_empty() {
            tracing::debug!("nothing to move");
            return Ok(vec![]);
        }

        self.apply(changes).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn assign(&self, date: Date, meal_id: &str) -> mealmuse_shared::Result<MealPlan> {
        let household = self.load().await?;

        if !household.meals.iter().any(|meal| meal.id == meal_id) {
            mealmuse_shared::not_found!("meal {}", meal_id);
        }

        let upsert = assign_meal(date, meal_id, &household.plans, &household.family);

        self.upsert(upsert).await
    }

    /// Stores a meal returned by the generator and plans it on `date`.
    #[tracing::instrument(skip(self, value))]
    pub async fn assign_generated(
        &self,
        date: Date,
        value: Value,
    ) -> mealmuse_shared::Result<(Meal, MealPlan)> {
        let meal = generate::parse_meal(value)?;
        let meal = store::create::<Meal, _>(&self.0, &meal).await?;

        tracing::info!(meal_id = %meal.id, name = %meal.name, "generated meal saved");

        let plan = self.assign(date, &meal.id).await?;

        Ok((meal, plan))
    }

    #[tracing::instrument(skip(self, generator))]
    pub async fn generate<G: MealGenerator + ?Sized>(
        &self,
        generator: &G,
        date: Date,
        prompt: &str,
    ) -> mealmuse_shared::Result<(Meal, MealPlan)> {
        let value = generator.invoke(prompt, &generate::meal_schema()).await?;

        self.assign_generated(date, value).await
    }

    /// Plans a meal picked from the favorites list.
    #[tracing::instrument(skip(self))]
    pub async fn assign_favorite(&self, date: Date, meal_id: &str) -> mealmuse_shared::Result<MealPlan> {
        let household = self.load().await?;

        let Some(meal) = household.meals.iter().find(|meal| meal.id == meal_id) else {
            mealmuse_shared::not_found!("meal {}", meal_id);
        };

        if !meal.is_favorite {
            mealmuse_shared::user!("'{}' is not a favorite meal", meal.name);
        }

        let upsert = assign_meal(date, meal_id, &household.plans, &household.family);

        self.upsert(upsert).await
    }

    #[tracing::instrument(skip(self, generator))]
    pub async fn suggest<G: MealGenerator + ?Sized>(
        &self,
        generator: &G,
        prompt: &str,
    ) -> mealmuse_shared::Result<Vec<MealSuggestion>> {
        generate::suggest_meals(generator, prompt).await
    }

    /// Stores a suggestion as a regular meal without planning it.
    #[tracing::instrument(skip(self, suggestion), fields(name = %suggestion.name))]
    pub async fn save_suggestion(&self, suggestion: MealSuggestion) -> mealmuse_shared::Result<Meal> {
        suggestion.validate()?;

        let meal = suggestion.into_meal();
        meal.validate()?;

        let meal = store::create::<Meal, _>(&self.0, &meal).await?;

        tracing::info!(meal_id = %meal.id, "suggestion saved");

        Ok(meal)
    }

    pub async fn meals(&self, favorites_only: bool) -> mealmuse_shared::Result<Vec<Meal>> {
        let meals = store::list::<Meal, _>(&self.0).await?;

        Ok(meals
            .into_iter()
            .filter(|meal| !favorites_only || meal.is_favorite)
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_favorite(&self, meal_id: &str, favorite: bool) -> mealmuse_shared::Result<Meal> {
        store::update::<Meal, _>(&self.0, meal_id, &json!({ "is_favorite": favorite })).await
    }

    #[tracing::instrument(skip(self, member), fields(name = %member.name))]
    pub async fn add_member(&self, member: FamilyMember) -> mealmuse_shared::Result<FamilyMember> {
        member.validate()?;

        let member = FamilyMember {
            id: String::new(),
            ..member
        };

        store::create::<FamilyMember, _>(&self.0, &member).await
    }

    #[tracing::instrument(skip(self, changes))]
    pub async fn update_member(
        &self,
        id: &str,
        changes: FamilyMemberChanges,
    ) -> mealmuse_shared::Result<FamilyMember> {
        changes.validate()?;

        if changes.is_empty() {
            mealmuse_shared::user!("no changes given for family member {}", id);
        }

        store::update::<FamilyMember, _>(&self.0, id, &changes).await
    }

    /// Returns whether a member was removed. Existing plans keep their
    /// member ids.
    #[tracing::instrument(skip(self))]
    pub async fn remove_member(&self, id: &str) -> mealmuse_shared::Result<bool> {
        store::delete::<FamilyMember, _>(&self.0, id).await
    }

    /// Overwrites the household preferences, creating the record on first save.
    #[tracing::instrument(skip(self, preferences))]
    pub async fn save_preferences(
        &self,
        preferences: FamilyPreferences,
    ) -> mealmuse_shared::Result<FamilyPreferences> {
        let preferences = FamilyPreferences {
            id: String::new(),
            ..preferences.normalized()
        };

        let existing = self.0.list(FamilyPreferences::COLLECTION).await?;

        let Some(current) = existing.first() else {
            return store::create::<FamilyPreferences, _>(&self.0, &preferences).await;
        };

        let id = current["id"].as_str().unwrap_or_default();

        // A merge would leave the old alias keys next to the new ones.
        if current.get("favorite_cuisines").is_some() || current.get("cooking_equipment").is_some() {
            store::delete::<FamilyPreferences, _>(&self.0, id).await?;
            return store::create::<FamilyPreferences, _>(&self.0, &preferences).await;
        }

        store::update::<FamilyPreferences, _>(&self.0, id, &preferences).await
    }

    /// Returns whether a plan was removed.
    #[tracing::instrument(skip(self))]
    pub async fn unassign(&self, date: Date) -> mealmuse_shared::Result<bool> {
        let plans = store::list::<MealPlan, _>(&self.0).await?;
        let Some(plan) = plans.iter().find(|plan| plan.date == date) else {
            return Ok(false);
        };

        store::delete::<MealPlan, _>(&self.0, &plan.id).await
    }

    /// Deletes run before upserts so a moved plan never coexists with its copy.
    pub async fn apply(&self, changes: ChangeSet) -> mealmuse_shared::Result<Vec<MealPlan>> {
        for id in &changes.to_delete {
            store::delete::<MealPlan, _>(&self.0, id).await?;
        }

        let mut saved = Vec::with_capacity(changes.to_upsert.len());

        for upsert in changes.to_upsert {
            saved.push(self.upsert(upsert).await?);
        }

        Ok(saved)
    }

    async fn upsert(&self, upsert: PlanUpsert) -> mealmuse_shared::Result<MealPlan> {
        match upsert {
            PlanUpsert::Update { id, changes } => {
                store::update::<MealPlan, _>(&self.0, &id, &changes).await
            }
            PlanUpsert::Create(plan) => store::create::<MealPlan, _>(&self.0, &plan).await,
        }
    }
}
