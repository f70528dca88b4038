mod download;
mod fs;
mod logging;

pub(crate) use download::*;
pub(crate) use fs::*;
pub(crate) use logging::*;
