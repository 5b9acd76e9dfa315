mod command;
mod date;
pub mod de;
pub mod family;
pub mod generate;
pub mod meal;
pub mod mealplan;
pub mod store;

pub use command::*;
pub use date::*;
