pub mod analysis_result;
pub mod ingredient_analysis;
pub mod severity;

pub use analysis_result::*;
pub use ingredient_analysis::*;
pub use severity::*;
