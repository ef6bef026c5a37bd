use chrono::{DateTime, SecondsFormat, Utc};
use core_types::{TradeSide, Unit};
use serde::Serialize;

/// Profit-and-loss of one strategy at the moment it was captured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlReport {
    pub strategy: String,
    pub value: f64,
    pub unit: Unit,
    pub capture_time: DateTime<Utc>,
}

impl PnlReport {
    pub fn new(strategy: impl Into<String>, value: f64) -> Self {
        Self {
            strategy: strategy.into(),
            value,
            unit: Unit::Euro,
            capture_time: Utc::now(),
        }
    }

    /// The capture time as ISO-8601 in UTC with a trailing `Z`,
    /// e.g. `2024-01-31T12:00:00.123456Z`.
    pub fn capture_time_iso(&self) -> String {
        self.capture_time.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Total traded volume on one side of the book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeReport {
    pub side: TradeSide,
    pub value: f64,
    pub unit: Unit,
}

impl VolumeReport {
    pub fn new(side: TradeSide, value: f64) -> Self {
        Self {
            side,
            value,
            unit: Unit::MegaWatt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn capture_time_is_utc_with_z_suffix() {
        let mut report = PnlReport::new("S", 10.0);
        report.capture_time = Utc.with_ymd_and_hms(2012, 12, 20, 12, 13, 0).unwrap();
        assert_eq!(report.capture_time_iso(), "2012-12-20T12:13:00.000000Z");
        assert_eq!(report.unit, Unit::Euro);
    }

    #[test]
    fn volume_reports_are_in_megawatts() {
        let report = VolumeReport::new(TradeSide::Buy, 12.0);
        assert_eq!(report.unit, Unit::MegaWatt);
    }
}
