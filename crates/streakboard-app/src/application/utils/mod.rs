mod day_bounds;

pub use day_bounds::{local_day_window, start_of_local_day};
