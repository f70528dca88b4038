mod chart;

pub(crate) use chart::*;
