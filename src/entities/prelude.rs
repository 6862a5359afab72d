pub use super::holidays::Entity as Holidays;
pub use super::stores::Entity as Stores;
pub use super::timelogs::Entity as Timelogs;
pub use super::users::Entity as Users;
pub use super::workers::Entity as Workers;
