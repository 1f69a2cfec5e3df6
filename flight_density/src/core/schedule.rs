//! In-memory table of domestic schedule legs.

use std::collections::HashSet;

use super::domain::ScheduleLeg;

/// Pruned, read-only table of schedule legs addressed by row index.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTable {
    legs: Vec<ScheduleLeg>,
}

impl ScheduleTable {
    pub fn new(legs: Vec<ScheduleLeg>) -> Self {
        Self { legs }
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleLeg> {
        self.legs.get(index)
    }

    pub fn legs(&self) -> &[ScheduleLeg] {
        &self.legs
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleLeg> {
        self.legs.iter()
    }

    /// Every departure and arrival code referenced by the table.
    pub fn airport_codes(&self) -> HashSet<String> {
        self.legs
            .iter()
            .flat_map(|leg| [leg.departure_airport.clone(), leg.arrival_airport.clone()])
            .collect()
    }
}

impl FromIterator<ScheduleLeg> for ScheduleTable {
    fn from_iter<I: IntoIterator<Item = ScheduleLeg>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
