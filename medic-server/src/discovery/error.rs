//! Scan error types.

use chrono::Duration;

use crate::overpass::OverpassError;

/// Why a scan produced no new ranked list.
///
/// All variants are recoverable; the user may scan again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// A scan ran too recently
    #[error("scan cooldown active ({}s remaining)", remaining_secs(.remaining))]
    CooldownActive { remaining: Duration },

    /// No GPS fix or searched place yet
    #[error("no reference coordinate set")]
    NoReferenceCoordinate,

    /// Every geodata endpoint failed
    #[error("all {attempted} geodata endpoints unavailable")]
    AllEndpointsUnavailable { attempted: usize },

    /// The query succeeded but nothing is nearby
    #[error("no facilities found")]
    NoFacilitiesFound,

    /// A newer scan started while this one was in flight
    #[error("scan {generation} superseded by scan {latest}")]
    Superseded { generation: u64, latest: u64 },
}

/// Whole seconds left, rounded up so "0s" is never shown while blocked.
fn remaining_secs(remaining: &Duration) -> i64 {
    let millis = remaining.num_milliseconds().max(0);
    (millis + 999) / 1000
}

impl ScanError {
    /// Short status line for the HUD.
    pub fn hud_message(&self) -> String {
        match self {
            ScanError::CooldownActive { remaining } => {
                format!("WAIT {}s BEFORE NEXT SCAN", remaining_secs(remaining))
            }
            ScanError::NoReferenceCoordinate => "SET LOCATION OR GPS FIRST".to_string(),
            ScanError::AllEndpointsUnavailable { .. } => "ALL SERVERS BUSY – TRY LATER".to_string(),
            ScanError::NoFacilitiesFound => "NO FACILITIES FOUND".to_string(),
            ScanError::Superseded { .. } => "SCAN SUPERSEDED".to_string(),
        }
    }
}

impl From<OverpassError> for ScanError {
    fn from(err: OverpassError) -> Self {
        match err {
            OverpassError::AllEndpointsFailed { attempted } => {
                ScanError::AllEndpointsUnavailable { attempted }
            }
            _ => ScanError::AllEndpointsUnavailable { attempted: 1 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScanError::CooldownActive {
            remaining: Duration::milliseconds(12_300),
        };
        assert_eq!(err.to_string(), "scan cooldown active (13s remaining)");
        assert_eq!(err.hud_message(), "WAIT 13s BEFORE NEXT SCAN");

        let err = ScanError::AllEndpointsUnavailable { attempted: 3 };
        assert_eq!(err.to_string(), "all 3 geodata endpoints unavailable");
        assert_eq!(err.hud_message(), "ALL SERVERS BUSY – TRY LATER");

        let err = ScanError::Superseded {
            generation: 1,
            latest: 2,
        };
        assert_eq!(err.to_string(), "scan 1 superseded by scan 2");
    }

    #[test]
    fn hud_messages() {
        assert_eq!(
            ScanError::NoReferenceCoordinate.hud_message(),
            "SET LOCATION OR GPS FIRST"
        );
        assert_eq!(ScanError::NoFacilitiesFound.hud_message(), "NO FACILITIES FOUND");
    }

    #[test]
    fn from_overpass_error() {
        let err = ScanError::from(OverpassError::AllEndpointsFailed { attempted: 2 });
        assert_eq!(err, ScanError::AllEndpointsUnavailable { attempted: 2 });

        let err = ScanError::from(OverpassError::Fixture {
            message: "gone".into(),
        });
        assert_eq!(err, ScanError::AllEndpointsUnavailable { attempted: 1 });
    }
}
