//! Key times of day derived from sunrise and sunset

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub golden_morning: DateTime<Utc>,
    pub golden_evening: DateTime<Utc>,
    pub mid_morning: DateTime<Utc>,
    pub midday: DateTime<Utc>,
    pub mid_afternoon: DateTime<Utc>,
    /// Blue hour
    pub twilight: DateTime<Utc>,
    pub night: DateTime<Utc>,
}

impl SunTimes {
    pub fn from_sunrise_sunset(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        let day_ms = (sunset - sunrise).num_milliseconds().max(0);
        let at = |fraction: f64| sunrise + Duration::milliseconds((day_ms as f64 * fraction) as i64);
        // Golden light spans ~10% of the day; mark the middle of each window
        let half_golden = Duration::milliseconds(day_ms / 20);

        Self {
            sunrise,
            sunset,
            golden_morning: sunrise + half_golden,
            golden_evening: sunset - half_golden,
            mid_morning: at(0.25),
            midday: at(0.5),
            mid_afternoon: at(0.75),
            twilight: sunset + Duration::minutes(30),
            night: sunset + Duration::minutes(90),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_twelve_hour_day() {
        let sunrise = Utc.with_ymd_and_hms(2024, 3, 20, 6, 0, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap();
        let t = SunTimes::from_sunrise_sunset(sunrise, sunset);

        assert_eq!(t.golden_morning, Utc.with_ymd_and_hms(2024, 3, 20, 6, 36, 0).unwrap());
        assert_eq!(t.golden_evening, Utc.with_ymd_and_hms(2024, 3, 20, 17, 24, 0).unwrap());
        assert_eq!(t.mid_morning, Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap());
        assert_eq!(t.midday, Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap());
        assert_eq!(t.mid_afternoon, Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap());
        assert_eq!(t.twilight, Utc.with_ymd_and_hms(2024, 3, 20, 18, 30, 0).unwrap());
        assert_eq!(t.night, Utc.with_ymd_and_hms(2024, 3, 20, 19, 30, 0).unwrap());
    }
}
