mod color;
mod district;
mod document;
mod hospital;
mod legend;

pub use district::District;
pub use document::{MapView, PolicyMap};
pub use hospital::{Anchor, Hospital, HospitalKind, Loaded};

pub(crate) use district::{districts_with_counted_hospitals, districts_with_density, read_density};

/// DataV boundary feed for Shenzhen (adcode 440300) with district polygons.
pub const SHENZHEN_DISTRICTS_URL: &str = "https://geo.datav.aliyun.com/areas_v3/bound/440300_full.json";
