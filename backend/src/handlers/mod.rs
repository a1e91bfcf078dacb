pub mod assets;
pub mod names;
pub mod page;
