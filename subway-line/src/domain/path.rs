//! The ordered section path of a single line.
//!
//! Sections are indexed by their up-station and by their down-station, and
//! the two terminal stations are tracked explicitly. Insertion-case
//! detection, validation and the reconstruction walk are all O(1) per step
//! and do not depend on the order sections were added in.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, trace};

use super::{LineId, PathError, Section, SortedView, Station, StationId};

/// Where an accepted section goes.
#[derive(Debug)]
enum Placement {
    /// New section ends at the current first station
    Prepend,
    /// New section replaces an existing one as its two halves
    Split(Section, Section),
    /// New section starts at the current last station
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ends {
    first: StationId,
    last: StationId,
}

/// The stations of one line, held as a simple path of sections.
///
/// # Invariants
///
/// After every successful mutation:
/// - Sections form one simple path: a single first station, a single last
///   station, and every other station entered and left exactly once
/// - No station is the up-station (or the down-station) of two sections
/// - Every section has a positive distance, including split halves
///
/// The empty path is valid and is the initial state.
///
/// # Examples
///
/// ```
/// use subway_line::domain::{Distance, LineId, Section, SectionPath, Station, StationId};
///
/// let line = LineId(2);
/// let a = Station::new(StationId(1), "A");
/// let b = Station::new(StationId(2), "B");
/// let d = Station::new(StationId(3), "D");
/// let section = |up: &Station, down: &Station, km| {
///     Section::new(line, up.clone(), down.clone(), Distance::new(km).unwrap()).unwrap()
/// };
///
/// let mut path = SectionPath::new(line);
/// path.add_section(section(&a, &b, 10)).unwrap();
/// path.add_section(section(&a, &d, 3)).unwrap(); // splits A -> B
///
/// assert_eq!(path.sorted_stations().unwrap(), vec![a, d, b]);
/// ```
#[derive(Debug, Clone)]
pub struct SectionPath {
    line: LineId,
    /// Sections keyed by up-station.
    by_up: HashMap<StationId, Section>,
    /// Down-station to the up-station of the section arriving there.
    up_of: HashMap<StationId, StationId>,
    ends: Option<Ends>,
}

impl SectionPath {
    /// Creates an empty path for `line`.
    pub fn new(line: LineId) -> Self {
        Self {
            line,
            by_up: HashMap::new(),
            up_of: HashMap::new(),
            ends: None,
        }
    }

    /// Rebuilds a path from previously stored sections, in any order.
    ///
    /// Unlike [`add_section`](Self::add_section) this does not replay
    /// insertions; it checks that the whole set forms a simple path.
    ///
    /// # Errors
    ///
    /// Returns `LineMismatch` for a section of another line, and
    /// `BrokenInvariant` if the sections do not form a simple path.
    pub fn from_sections<I>(line: LineId, sections: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = Section>,
    {
        let mut path = Self::new(line);

        for section in sections {
            path.check_line(&section)?;
            let up = section.up_station().id();
            let down = section.down_station().id();
            if path.by_up.contains_key(&up) || path.up_of.contains_key(&down) {
                return Err(broken("station repeated in stored sections"));
            }
            path.link(section);
        }

        let view = path.sorted_sections()?;
        path.ends = match (view.first_up_station(), view.last_down_station()) {
            (Some(first), Some(last)) => Some(Ends {
                first: first.id(),
                last: last.id(),
            }),
            _ => None,
        };

        debug!(line = %line, sections = path.len(), "section path loaded");
        Ok(path)
    }

    /// Returns the line this path belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.by_up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_up.is_empty()
    }

    /// Returns true if the line has at least one section.
    pub fn has_section(&self) -> bool {
        !self.is_empty()
    }

    /// Returns true if `id` is a station of this line.
    pub fn contains_station(&self, id: StationId) -> bool {
        self.by_up.contains_key(&id) || self.up_of.contains_key(&id)
    }

    /// Looks up a station of this line by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        if let Some(section) = self.by_up.get(&id) {
            return Some(section.up_station());
        }
        self.up_of
            .get(&id)
            .and_then(|up| self.by_up.get(up))
            .map(Section::down_station)
    }

    /// Returns the first station of the line.
    pub fn first_station(&self) -> Option<&Station> {
        let ends = self.ends?;
        self.by_up.get(&ends.first).map(Section::up_station)
    }

    /// Returns the last station of the line.
    pub fn last_station(&self) -> Option<&Station> {
        let ends = self.ends?;
        self.station(ends.last)
    }

    /// Iterates sections in travel order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        let first = self.ends.and_then(|ends| self.by_up.get(&ends.first));
        std::iter::successors(first, |section| {
            self.by_up.get(&section.down_station().id())
        })
        .take(self.by_up.len())
    }

    /// Sum of all section distances.
    pub fn total_distance(&self) -> u64 {
        self.by_up
            .values()
            .map(|s| u64::from(s.distance().get()))
            .sum()
    }

    /// Adds a section to the line.
    ///
    /// The first section of an empty line is accepted as-is. Otherwise the
    /// section must pass, in order:
    /// 1. a length check against the section leaving the same up-station
    /// 2. a duplicate check (not both endpoints already on the line)
    /// 3. a connectivity check (exactly one endpoint already on the line)
    ///
    /// and then extends the line at the front, splits the section leaving
    /// its up-station, or extends the line at the end.
    ///
    /// # Errors
    ///
    /// Returns `SectionTooLong`, `SectionsAlreadyExist`, `DisconnectedSection`
    /// or `LineMismatch`. The path is unchanged on error.
    pub fn add_section(&mut self, section: Section) -> Result<(), PathError> {
        self.check_line(&section)?;

        let up = section.up_station().id();
        let down = section.down_station().id();
        let distance = section.distance();

        let Some(ends) = self.ends else {
            self.ends = Some(Ends {
                first: up,
                last: down,
            });
            self.link(section);
            debug!(line = %self.line, %up, %down, %distance, "first section added");
            return Ok(());
        };

        let section = self.with_stored_stations(section);
        let placement = self.place(&section, ends).inspect_err(|e| {
            debug!(line = %self.line, %up, %down, %distance, error = %e, "section rejected");
        })?;
        trace!(line = %self.line, ?placement, "section placement decided");

        match placement {
            Placement::Prepend => {
                self.ends = Some(Ends { first: up, ..ends });
                self.link(section);
            }
            Placement::Append => {
                self.ends = Some(Ends { last: down, ..ends });
                self.link(section);
            }
            Placement::Split(head, tail) => {
                self.unlink(up);
                self.link(head);
                self.link(tail);
            }
        }

        debug!(line = %self.line, %up, %down, %distance, sections = self.len(), "section added");
        Ok(())
    }

    /// Removes the last section of the line.
    ///
    /// `station` must be the up- or down-station of the last section.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` when there is nothing to remove and
    /// `NotEndStation` when `station` is not on the last section.
    pub fn remove_section(&mut self, station: &Station) -> Result<(), PathError> {
        let ends = self.ends.ok_or(PathError::EmptyPath)?;
        let last_up = *self
            .up_of
            .get(&ends.last)
            .ok_or_else(|| broken("last station has no incoming section"))?;

        let last = self
            .by_up
            .get(&last_up)
            .ok_or_else(|| broken("last section missing from index"))?;

        let id = station.id();
        if !last.touches(id) {
            debug!(line = %self.line, station = %id, "removal rejected: not an end station");
            return Err(PathError::NotEndStation(id));
        }

        self.unlink(last_up);
        self.ends = if self.by_up.is_empty() {
            None
        } else {
            Some(Ends {
                last: last_up,
                ..ends
            })
        };

        debug!(line = %self.line, station = %id, sections = self.len(), "section removed");
        Ok(())
    }

    /// Returns the stations in travel order, first to last.
    ///
    /// # Errors
    ///
    /// Returns `BrokenInvariant` if the sections do not form a simple path.
    pub fn sorted_stations(&self) -> Result<Vec<Station>, PathError> {
        Ok(self.sorted_sections()?.stations())
    }

    /// Reconstructs travel order from the section set alone.
    ///
    /// The first station is the one station that appears exactly once and
    /// as an up-station. From there the walk follows the section leaving
    /// the current station, once per section.
    pub fn sorted_sections(&self) -> Result<SortedView, PathError> {
        let mut view = SortedView::with_capacity(self.len());
        let Some(mut frontier) = self.find_start()? else {
            return Ok(view);
        };

        let mut visited = HashSet::with_capacity(self.len());
        for _ in 0..self.len() {
            if !visited.insert(frontier) {
                return Err(broken("walk revisited a station"));
            }
            let section = self
                .by_up
                .get(&frontier)
                .ok_or_else(|| broken("walk ended before covering every section"))?;
            view.push(section.clone());
            frontier = section.down_station().id();
        }

        Ok(view)
    }

    fn find_start(&self) -> Result<Option<StationId>, PathError> {
        if self.by_up.is_empty() {
            return Ok(None);
        }

        let mut appearances: HashMap<StationId, usize> = HashMap::new();
        for section in self.by_up.values() {
            *appearances.entry(section.up_station().id()).or_default() += 1;
            *appearances.entry(section.down_station().id()).or_default() += 1;
        }

        let mut candidates = appearances
            .into_iter()
            .filter(|&(id, count)| count == 1 && self.by_up.contains_key(&id))
            .map(|(id, _)| id);

        match (candidates.next(), candidates.next()) {
            (Some(start), None) => Ok(Some(start)),
            (None, _) => Err(broken("no start station")),
            (Some(_), Some(_)) => Err(broken("more than one start station")),
        }
    }

    fn check_line(&self, section: &Section) -> Result<(), PathError> {
        if section.line() != self.line {
            return Err(PathError::LineMismatch {
                expected: self.line,
                actual: section.line(),
            });
        }
        Ok(())
    }

    /// Validates a section against a non-empty path and decides where it goes.
    fn place(&self, section: &Section, ends: Ends) -> Result<Placement, PathError> {
        let up = section.up_station().id();
        let down = section.down_station().id();
        let existing = self.by_up.get(&up);

        if let Some(existing) = existing {
            if section.distance() >= existing.distance() {
                return Err(PathError::SectionTooLong {
                    requested: section.distance(),
                    existing: existing.distance(),
                });
            }
        }

        let known =
            usize::from(self.contains_station(up)) + usize::from(self.contains_station(down));
        if known == 2 {
            return Err(PathError::SectionsAlreadyExist { up, down });
        }
        if known != 1 {
            return Err(PathError::DisconnectedSection { up, down });
        }

        if down == ends.first {
            return Ok(Placement::Prepend);
        }

        if let Some(existing) = existing {
            let (head, tail) = existing
                .split(section)
                .ok_or(PathError::SectionTooLong {
                    requested: section.distance(),
                    existing: existing.distance(),
                })?;
            return Ok(Placement::Split(head, tail));
        }

        if up == ends.last {
            return Ok(Placement::Append);
        }

        // Only the down-station is known and it is not the first station:
        // attaching here would give that station two incoming sections.
        Err(PathError::DisconnectedSection { up, down })
    }

    /// Replaces endpoints already on the line with the stored stations,
    /// so each id keeps a single name.
    fn with_stored_stations(&self, section: Section) -> Section {
        let up = self.station(section.up_station().id()).cloned();
        let down = self.station(section.down_station().id()).cloned();
        if up.is_none() && down.is_none() {
            return section;
        }
        section.with_stations(up, down)
    }

    fn link(&mut self, section: Section) {
        let up = section.up_station().id();
        self.up_of.insert(section.down_station().id(), up);
        self.by_up.insert(up, section);
    }

    fn unlink(&mut self, up: StationId) -> Option<Section> {
        let section = self.by_up.remove(&up)?;
        self.up_of.remove(&section.down_station().id());
        Some(section)
    }
}

fn broken(reason: &'static str) -> PathError {
    error!(reason, "section path invariant broken");
    PathError::BrokenInvariant(reason)
}
