pub mod blog;
pub mod community;
pub mod forum;
