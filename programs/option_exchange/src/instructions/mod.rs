pub mod cancel_order;
pub mod create_market;
pub mod fill_order;
pub mod place_order;
pub mod sell_options;

pub use cancel_order::*;
pub use create_market::*;
pub use fill_order::*;
pub use place_order::*;
pub use sell_options::*;
