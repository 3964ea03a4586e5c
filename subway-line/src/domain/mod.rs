//! Domain types for a subway line's section path.
//!
//! Value types (`Station`, `Distance`, `Section`) enforce their invariants
//! at construction. `SectionPath` keeps a line's sections a simple path
//! under insertion and removal.

mod distance;
mod error;
mod line;
mod path;
mod section;
mod sorted;
mod station;


pub use distance::{Distance, InvalidDistance};
pub use error::PathError;
pub use line::LineId;
pub use path::SectionPath;
pub use section::{Section, SectionError};
pub use sorted::SortedView;
pub use station::{Station, StationId};
