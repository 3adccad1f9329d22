//! Raw match records as handed over by the data-retrieval layer.
//!
//! Everything here is plain data decoded with serde. Fields a malformed payload may
//! lack are kept optional so that consumers can skip a single bad entry instead of
//! failing the whole decode.

use std::path::Path;

pub use error::Error;

pub mod error;
pub mod model;
pub mod timeline;

/// Team ID of the blue side
pub const BLUE_TEAM: u16 = 100;
/// Team ID of the red side
pub const RED_TEAM: u16 = 200;

/// Get the team on the other side of the map, if `team_id` is a known side.
pub fn opposing_team(team_id: u16) -> Option<u16> {
    match team_id {
        BLUE_TEAM => Some(RED_TEAM),
        RED_TEAM => Some(BLUE_TEAM),
        _ => None,
    }
}

impl model::MatchRecord {
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl timeline::TimelineRecord {
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_team_flips_known_sides() {
        assert_eq!(opposing_team(BLUE_TEAM), Some(RED_TEAM));
        assert_eq!(opposing_team(RED_TEAM), Some(BLUE_TEAM));
        assert_eq!(opposing_team(300), None);
    }

    #[test]
    fn decode_error_is_reported() {
        let err = model::MatchRecord::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
