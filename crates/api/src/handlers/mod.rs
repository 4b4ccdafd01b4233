pub mod auth;
pub mod forms;
pub mod forms2;
pub mod users;
