use anyhow::Result;
use mealmuse::Config;
use mealmuse_mealplan::{DashboardStats, UPCOMING_LIMIT, meal_by_id, upcoming};
use mealmuse_shared::{format_day_key, today};

use super::open_command;

pub async fn stats(config: &Config) -> Result<()> {
    let command = open_command(config).await?;
    let household = command.load().await?;
    let stats = DashboardStats::compute(&household.meals, &household.plans);

    println!("Meals: {}", stats.total_meals);
    println!("Favorites: {}", stats.favorite_count);
    println!("Planned: {}", stats.planned_count);

    let from = today(&config.calendar.timezone)?;
    let next = upcoming(&household.plans, from, UPCOMING_LIMIT);

    if next.is_empty() {
        println!("No upcoming meals");
        return Ok(());
    }

    println!("Upcoming:");
    for plan in next {
        let meal = meal_by_id(&plan.meal_id, &household.meals)
            .map(|meal| meal.name.as_str())
            .unwrap_or("(deleted meal)");
        println!("  {} {} {}", format_day_key(plan.date), plan.meal_type, meal);
    }

    Ok(())
}
