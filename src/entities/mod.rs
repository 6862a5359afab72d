pub mod prelude;

pub mod holidays;
pub mod stores;
pub mod timelogs;
pub mod users;
pub mod workers;
