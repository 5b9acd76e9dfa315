use anyhow::Result;
use clap::Args;
use mealmuse::Config;
use mealmuse_shared::family::{
    Adventurousness, FamilyMember, FamilyMemberChanges, FamilyPreferences, split_labels,
};

use super::{meal_generator, open_command};

/// Family member fields shared by `family add` and `family edit`.
#[derive(Args, Debug, Default)]
pub struct MemberFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub age: Option<u8>,

    /// Comma separated, e.g. "vegetarian, gluten-free"
    #[arg(long)]
    pub diet: Option<String>,

    /// Comma separated, e.g. "peanuts, shellfish"
    #[arg(long)]
    pub allergies: Option<String>,

    /// picky_eater, conservative, moderate, adventurous or experimental
    #[arg(long)]
    pub adventurousness: Option<Adventurousness>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl MemberFields {
    fn into_changes(self) -> FamilyMemberChanges {
        FamilyMemberChanges {
            name: self.name.map(|name| name.trim().to_owned()),
            age: self.age,
            dietary_restrictions: self.diet.as_deref().map(split_labels),
            allergies: self.allergies.as_deref().map(split_labels),
            adventurousness_level: self.adventurousness,
            other_preferences: self.notes.map(|notes| notes.trim().to_owned()),
        }
    }
}

pub async fn family(config: &Config) -> Result<()> {
    let command = open_command(config).await?;
    let household = command.load().await?;

    if household.family.is_empty() {
        println!("No family members yet");
    }

    for member in &household.family {
        let age = member
            .age
            .map(|age| format!(", {age}"))
            .unwrap_or_default();
        println!(
            "{}{} ({}) [{}]",
            member.name, age, member.adventurousness_level, member.id
        );

        if !member.dietary_restrictions.is_empty() {
            println!("  diet: {}", member.dietary_restrictions.join(", "));
        }
        if !member.allergies.is_empty() {
            println!("  allergies: {}", member.allergies.join(", "));
        }
        if !member.other_preferences.is_empty() {
            println!("  notes: {}", member.other_preferences);
        }
    }

    if let Some(preferences) = &household.preferences {
        println!("Cuisines: {}", preferences.preferred_cuisines.join(", "));
        println!("Equipment: {}", preferences.cooking_apparatus.join(", "));
    }

    Ok(())
}

pub async fn add_member(config: &Config, fields: MemberFields) -> Result<()> {
    let changes = fields.into_changes();
    let member = FamilyMember {
        id: String::new(),
        name: changes.name.unwrap_or_default(),
        age: changes.age,
        dietary_restrictions: changes.dietary_restrictions.unwrap_or_default(),
        allergies: changes.allergies.unwrap_or_default(),
        adventurousness_level: changes.adventurousness_level.unwrap_or_default(),
        other_preferences: changes.other_preferences.unwrap_or_default(),
    };

    let command = open_command(config).await?;
    let member = command.add_member(member).await?;

    println!("Added {} [{}]", member.name, member.id);

    Ok(())
}

pub async fn edit_member(config: &Config, id: &str, fields: MemberFields) -> Result<()> {
    let command = open_command(config).await?;
    let member = command.update_member(id, fields.into_changes()).await?;

    println!("Updated {} [{}]", member.name, member.id);

    Ok(())
}

pub async fn remove_member(config: &Config, id: &str) -> Result<()> {
    let command = open_command(config).await?;

    if !command.remove_member(id).await? {
        anyhow::bail!("family member {id} not found");
    }

    println!("Removed {id}");

    Ok(())
}

pub async fn set_preferences(config: &Config, cuisines: &str, equipment: &str) -> Result<()> {
    let command = open_command(config).await?;
    let preferences = command
        .save_preferences(FamilyPreferences {
            id: String::new(),
            preferred_cuisines: split_labels(cuisines),
            cooking_apparatus: split_labels(equipment),
        })
        .await?;

    println!("Cuisines: {}", preferences.preferred_cuisines.join(", "));
    println!("Equipment: {}", preferences.cooking_apparatus.join(", "));

    Ok(())
}

pub async fn meals(config: &Config, favorites_only: bool) -> Result<()> {
    let command = open_command(config).await?;
    let meals = command.meals(favorites_only).await?;

    if meals.is_empty() {
        if favorites_only {
            println!("No favorite meals yet");
        } else {
            println!("No meals yet");
        }
        return Ok(());
    }

    for meal in &meals {
        let star = if meal.is_favorite { '*' } else { ' ' };
        println!(
            "{} {} ({} min, {}) [{}]",
            star,
            meal.name,
            meal.total_time(),
            meal.complexity_level,
            meal.id
        );
    }

    Ok(())
}

pub async fn favorite(config: &Config, meal_id: &str, favorite: bool) -> Result<()> {
    let command = open_command(config).await?;
    let meal = command.set_favorite(meal_id, favorite).await?;

    if meal.is_favorite {
        println!("Marked {} as a favorite", meal.name);
    } else {
        println!("Removed {} from favorites", meal.name);
    }

    Ok(())
}

/// Lists suggestions, saving the one at position `save` (1-based) when given.
pub async fn suggest(config: &Config, prompt: &str, save: Option<usize>) -> Result<()> {
    let generator = meal_generator(config)?;
    let command = open_command(config).await?;
    let mut suggestions = command.suggest(&generator, prompt).await?;

    for (n, suggestion) in suggestions.iter().enumerate() {
        println!(
            "{}. {} ({}, {} min)",
            n + 1,
            suggestion.name,
            suggestion.complexity_level,
            suggestion.prep_time.saturating_add(suggestion.cook_time)
        );
        if !suggestion.description.is_empty() {
            println!("   {}", suggestion.description);
        }
    }

    let Some(position) = save else {
        return Ok(());
    };

    if position == 0 || position > suggestions.len() {
        anyhow::bail!(
            "no suggestion number {position}, pick 1 to {}",
            suggestions.len()
        );
    }

    let meal = command
        .save_suggestion(suggestions.swap_remove(position - 1))
        .await?;

    println!("Saved {} [{}]", meal.name, meal.id);

    Ok(())
}
