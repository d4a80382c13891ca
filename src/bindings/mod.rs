pub mod core;
pub mod library;


pub use self::core::*;
pub use self::library::*;
