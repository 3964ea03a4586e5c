//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, Section, SectionPath, Station};

/// A station as sent by the client.
#[derive(Debug, Deserialize)]
pub struct StationRequest {
    pub id: u64,
    pub name: String,
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    /// Station the section leaves from
    pub up_station: StationRequest,

    /// Station the section arrives at
    pub down_station: StationRequest,

    /// Section length, must be positive
    pub distance: u32,
}

/// Query for removing the last section of a line.
#[derive(Debug, Deserialize)]
pub struct RemoveSectionQuery {
    pub station_id: u64,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: u64,
    pub name: String,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id().0,
            name: station.name().to_string(),
        }
    }
}

/// Ordered stations of a line.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub line_id: u64,
    pub stations: Vec<StationResult>,
}

impl StationsResponse {
    pub fn new(line: LineId, stations: &[Station]) -> Self {
        Self {
            line_id: line.0,
            stations: stations.iter().map(StationResult::from).collect(),
        }
    }
}

/// A section in responses.
#[derive(Debug, Serialize)]
pub struct SectionResult {
    pub up_station: StationResult,
    pub down_station: StationResult,
    pub distance: u32,
}

impl From<&Section> for SectionResult {
    fn from(section: &Section) -> Self {
        Self {
            up_station: section.up_station().into(),
            down_station: section.down_station().into(),
            distance: section.distance().get(),
        }
    }
}

/// Sections of a line in travel order.
#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub line_id: u64,
    pub sections: Vec<SectionResult>,
    pub total_distance: u64,
}

impl From<&SectionPath> for SectionsResponse {
    fn from(path: &SectionPath) -> Self {
        Self {
            line_id: path.line().0,
            sections: path.sections().map(SectionResult::from).collect(),
            total_distance: path.total_distance(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Machine-readable error code, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}
