pub mod base;
pub mod name;
pub mod scalars;
