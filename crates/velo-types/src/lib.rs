pub mod ids;
pub mod units;
pub mod value;

pub use ids::*;
pub use units::*;
pub use value::*;
