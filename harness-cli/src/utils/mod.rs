#[macro_use]
pub mod md;
