pub mod curve;
pub mod error;
pub mod integrate;
pub mod region;

pub use curve::{compute_lorenz_gini, CurvePoint, Lorenz, RankedRegion};
pub use error::LorenzError;
pub use integrate::trapezoid;
pub use region::Region;
