mod assign;
mod calendar;
mod command;
mod drag;
mod planned;
mod stats;

pub use assign::*;
pub use calendar::*;
pub use command::*;
pub use drag::*;
pub use planned::*;
pub use stats::*;
