mod lifecycle_manager;

pub use lifecycle_manager::*;
