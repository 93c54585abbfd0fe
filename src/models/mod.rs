pub mod plan;
pub mod subscription;
pub mod usage;

pub use plan::*;
pub use subscription::*;
pub use usage::*;
