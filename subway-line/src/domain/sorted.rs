//! Ordered view of a line's sections.

use super::{Section, Station};

/// Sections of a line in travel order, from the first station to the last.
///
/// Built fresh by [`SectionPath::sorted_sections`](super::SectionPath::sorted_sections);
/// it is a snapshot and does not track later changes to the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedView {
    sections: Vec<Section>,
}

impl SortedView {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            sections: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Returns the up-station of the first section, if any.
    pub fn first_up_station(&self) -> Option<&Station> {
        self.sections.first().map(Section::up_station)
    }

    /// Returns the down-station of the last section, if any.
    pub fn last_down_station(&self) -> Option<&Station> {
        self.sections.last().map(Section::down_station)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the stations in travel order.
    ///
    /// A view of `n` sections yields `n + 1` stations; an empty view yields none.
    pub fn stations(&self) -> Vec<Station> {
        let Some(first) = self.first_up_station() else {
            return Vec::new();
        };

        let mut stations = Vec::with_capacity(self.sections.len() + 1);
        stations.push(first.clone());
        stations.extend(self.sections.iter().map(|s| s.down_station().clone()));
        stations
    }

    /// Sum of all section distances.
    pub fn total_distance(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.distance().get()))
            .sum()
    }
}
