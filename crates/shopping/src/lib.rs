mod checklist;
pub mod collate;
mod consolidator;
mod list;

pub use checklist::*;
pub use consolidator::*;
pub use list::*;
