pub mod forms;
pub mod profile;
