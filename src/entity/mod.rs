pub mod cart_entries;
pub mod categories;
pub mod items;
pub mod users;
