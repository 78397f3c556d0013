pub mod about;
pub mod books;
pub mod openapi;
pub mod spa;
