pub mod pda;
pub mod math;
pub mod validation;

pub use pda::*;
pub use math::*;
pub use validation::*;
