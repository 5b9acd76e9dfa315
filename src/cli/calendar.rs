use anyhow::Result;
use mealmuse::Config;
use mealmuse_mealplan::CalendarWindow;
use mealmuse_shared::{format_day_key, parse_day_key, today};

use super::{meal_generator, open_command};

pub async fn show(config: &Config) -> Result<()> {
    let command = open_command(config).await?;
    let household = command.load().await?;
    let window = CalendarWindow::new(today(&config.calendar.timezone)?);

    for day in window.resolve(&household.plans, &household.meals) {
        let weekday = day.date.weekday().to_string();
        let meal = day.meal.map(|meal| meal.name.as_str()).unwrap_or("-");

        match day.plan {
            Some(plan) => println!("{} {:<9} {} [{}]", format_day_key(day.date), weekday, meal, plan.id),
            None => println!("{} {:<9} {}", format_day_key(day.date), weekday, meal),
        }
    }

    Ok(())
}

pub async fn assign(config: &Config, date: &str, meal_id: &str, favorite: bool) -> Result<()> {
    let date = parse_day_key(date)?;
    let command = open_command(config).await?;
    let plan = if favorite {
        command.assign_favorite(date, meal_id).await?
    } else {
        command.assign(date, meal_id).await?
    };

    println!("Planned {} on {}", plan.meal_id, format_day_key(plan.date));

    Ok(())
}

pub async fn unassign(config: &Config, date: &str) -> Result<()> {
    let date = parse_day_key(date)?;
    let command = open_command(config).await?;

    if command.unassign(date).await? {
        println!("Cleared {}", format_day_key(date));
    } else {
        println!("Nothing planned on {}", format_day_key(date));
    }

    Ok(())
}

pub async fn move_meal(config: &Config, from: &str, to: &str) -> Result<()> {
    let source = parse_day_key(from)?;
    let dest = parse_day_key(to)?;
    let command = open_command(config).await?;

    let saved = command.move_meal(source, dest).await?;

    if saved.is_empty() {
        println!("Nothing to move from {}", format_day_key(source));
    } else {
        println!("Moved {} to {}", format_day_key(source), format_day_key(dest));
    }

    Ok(())
}

pub async fn generate(config: &Config, date: &str, prompt: &str) -> Result<()> {
    let date = parse_day_key(date)?;
    let generator = meal_generator(config)?;
    let command = open_command(config).await?;

    let (meal, plan) = command.generate(&generator, date, prompt).await?;

    println!(
        "Planned {} ({} min, {}) on {}",
        meal.name,
        meal.total_time(),
        meal.complexity_level,
        format_day_key(plan.date)
    );

    Ok(())
}
