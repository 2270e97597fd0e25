pub mod index;
pub mod items;
pub mod students;
