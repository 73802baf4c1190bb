//! Command handlers for the habit tracker
//!
//! Each group of commands lives in its own file and adds `handle_*`
//! methods to [`crate::HabitHandler`].

pub mod day;
pub mod history;
pub mod tasks;
