pub mod position;
pub mod series;
pub mod vault;

pub use position::*;
pub use series::*;
pub use vault::*;
