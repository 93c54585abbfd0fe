pub mod plan_logic;
pub mod store;

pub use plan_logic::*;
pub use store::*;
