pub mod about;
pub mod app;
