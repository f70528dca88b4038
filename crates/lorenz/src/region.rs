/// One row of the input table: an administrative area with a head count and
/// a count of some resource (doctors, beds, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub population: u64,
    pub resource_count: u64,
}

impl Region {
    pub fn new(id: impl Into<String>, population: u64, resource_count: u64) -> Self {
        Self { id: id.into(), population, resource_count }
    }

    /// Resource per head. Only meaningful when `population > 0`.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.resource_count as f64 / self.population as f64
    }
}
