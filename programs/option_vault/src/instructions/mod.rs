pub mod burn_options;
pub mod create_series;
pub mod exercise;
pub mod mint_options;
pub mod option;
pub mod series_snapshot;
pub mod withdraw;

// Note: Glob imports are required for Anchor's #[program] macro
// The handler name collision is intentional - each module's handler is accessed via module path
#[allow(ambiguous_glob_reexports)]
pub use burn_options::*;
#[allow(ambiguous_glob_reexports)]
pub use create_series::*;
#[allow(ambiguous_glob_reexports)]
pub use exercise::*;
#[allow(ambiguous_glob_reexports)]
pub use mint_options::*;
#[allow(ambiguous_glob_reexports)]
pub use option::*;
#[allow(ambiguous_glob_reexports)]
pub use series_snapshot::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw::*;
