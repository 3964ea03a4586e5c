//! Station identity types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque station identifier, assigned by whoever owns station records.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u64);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station on a line.
///
/// Stations are identity-only references: two `Station` values are equal
/// (and hash the same) when their ids match, regardless of name. The name
/// is carried along for display.
///
/// # Examples
///
/// ```
/// use subway_line::domain::{Station, StationId};
///
/// let a = Station::new(StationId(1), "Gangnam");
/// let renamed = Station::new(StationId(1), "Gangnam (Line 2)");
/// assert_eq!(a, renamed);
/// assert_eq!(a.name(), "Gangnam");
/// ```
#[derive(Clone)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Creates a station reference.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the station id.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({}, {})", self.id.0, self.name)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
