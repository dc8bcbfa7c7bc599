pub mod user_management;
pub mod user_mapper;

pub use user_management::*;
pub use user_mapper::*;
