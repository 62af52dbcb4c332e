pub mod aws;
pub mod env;
pub mod files;
pub mod health;
pub mod logtest;
pub mod simulate;

// Re-export handler functions
pub use aws::*;
pub use env::*;
pub use files::*;
pub use health::*;
pub use logtest::*;
pub use simulate::*;
