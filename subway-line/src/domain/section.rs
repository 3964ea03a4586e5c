//! Section (edge) type.

use super::{Distance, LineId, Station, StationId};

/// Error returned when constructing an invalid section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// Up and down station are the same
    #[error("section cannot start and end at station {0}")]
    SameStation(StationId),
}

/// A directed, distance-weighted edge between two stations of a line.
///
/// Sections are immutable once built. Splitting produces two new sections
/// rather than editing the original.
///
/// # Examples
///
/// ```
/// use subway_line::domain::{Distance, LineId, Section, Station, StationId};
///
/// let a = Station::new(StationId(1), "A");
/// let b = Station::new(StationId(2), "B");
/// let section = Section::new(LineId(1), a.clone(), b, Distance::new(10).unwrap()).unwrap();
/// assert_eq!(section.up_station(), &a);
/// assert_eq!(section.distance().get(), 10);
///
/// // Loops are rejected
/// assert!(Section::new(LineId(1), a.clone(), a, Distance::new(1).unwrap()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    line: LineId,
    up: Station,
    down: Station,
    distance: Distance,
}

impl Section {
    /// Creates a section from `up` to `down`.
    pub fn new(
        line: LineId,
        up: Station,
        down: Station,
        distance: Distance,
    ) -> Result<Self, SectionError> {
        if up == down {
            return Err(SectionError::SameStation(up.id()));
        }

        Ok(Self {
            line,
            up,
            down,
            distance,
        })
    }

    /// Returns the owning line.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the station this section leaves from.
    pub fn up_station(&self) -> &Station {
        &self.up
    }

    /// Returns the station this section arrives at.
    pub fn down_station(&self) -> &Station {
        &self.down
    }

    /// Returns the section length.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns true if `id` is either endpoint.
    pub fn touches(&self, id: StationId) -> bool {
        self.up.id() == id || self.down.id() == id
    }

    /// Replaces the endpoints that are given, keeping ids unchanged.
    pub(crate) fn with_stations(self, up: Option<Station>, down: Option<Station>) -> Section {
        debug_assert!(up.as_ref().is_none_or(|s| *s == self.up));
        debug_assert!(down.as_ref().is_none_or(|s| *s == self.down));
        Section {
            up: up.unwrap_or(self.up),
            down: down.unwrap_or(self.down),
            ..self
        }
    }

    /// Splits this section at the down-station of `head`.
    ///
    /// `head` must leave from the same up-station and be strictly shorter.
    /// Returns `(head, remainder)` where the remainder runs from `head`'s
    /// down-station to this section's down-station, or `None` if `head`
    /// does not fit inside this section.
    pub(crate) fn split(&self, head: &Section) -> Option<(Section, Section)> {
        if head.up != self.up || head.down == self.down {
            return None;
        }

        let remaining = self.distance.checked_sub(head.distance)?;
        let tail = Section {
            line: self.line,
            up: head.down.clone(),
            down: self.down.clone(),
            distance: remaining,
        };

        Some((head.clone(), tail))
    }
}
