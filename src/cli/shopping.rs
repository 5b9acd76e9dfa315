use anyhow::Result;
use mealmuse::Config;
use mealmuse_mealplan::{CalendarWindow, planned_meals};
use mealmuse_shared::today;
use mealmuse_shopping::ShoppingList;

use super::open_command;

pub async fn show(config: &Config, plan_ids: &[String], checked: &[String]) -> Result<()> {
    let command = open_command(config).await?;
    let household = command.load().await?;
    let window = CalendarWindow::new(today(&config.calendar.timezone)?);
    let planned = planned_meals(&window, &household.plans, &household.meals);

    let mut list = ShoppingList::for_plans(&planned, plan_ids)?;

    for name in checked {
        list.toggle_item(name)?;
    }

    print!("{}", list.render());

    Ok(())
}
