//! Roll export (JSON / CSV)

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::session::{FrameLog, RollConditions, RollSession};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSummary {
    pub number: u32,
    pub film: String,
    /// Rated EI for the roll
    #[serde(rename = "iso")]
    pub ei: u32,
    pub format: String,
    #[serde(rename = "type")]
    pub film_type: String,
    pub loaded_at: String,
    pub exported_at: String,
    pub total_frames: u16,
    pub frames_logged: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub roll: RollSummary,
    pub conditions: RollConditions,
    pub frames: Vec<FrameLog>,
}

fn iso_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn build_export_data(session: &RollSession, exported_at: DateTime<Utc>) -> ExportData {
    let rec = session.recommendation();
    ExportData {
        roll: RollSummary {
            number: session.roll_number(),
            film: rec.film.clone(),
            ei: rec.ei,
            format: session.format().as_str().to_string(),
            film_type: session.film_type().display_text().to_string(),
            loaded_at: iso_timestamp(session.loaded_at()),
            exported_at: iso_timestamp(exported_at),
            total_frames: session.total_frames(),
            frames_logged: session.frames_logged(),
        },
        conditions: session.conditions().clone(),
        frames: session.frame_log().to_vec(),
    }
}

/// Pretty-printed JSON export
pub fn export_json(session: &RollSession, exported_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build_export_data(session, exported_at))
}

/// CSV export with a commented roll header
pub fn export_csv(session: &RollSession) -> String {
    let rec = session.recommendation();
    let mut lines: Vec<String> = Vec::with_capacity(session.frames_logged() + 6);

    lines.push(format!("# Roll {} - {}", session.roll_number(), rec.film));
    lines.push(format!(
        "# ISO {} | {} {}",
        rec.ei,
        session.format(),
        session.film_type().display_text()
    ));
    lines.push(format!("# Loaded: {}", session.loaded_at().format("%Y-%m-%d")));
    lines.push(format!(
        "# Frames: {} of {} logged",
        session.frames_logged(),
        session.total_frames()
    ));
    lines.push(String::new());

    lines.push("Frame,Aperture,Shutter,Notes,Timestamp".to_string());
    for frame in session.frame_log() {
        lines.push(format!(
            "{},{},{},\"{}\",{}",
            frame.frame_number,
            frame.aperture,
            frame.shutter,
            frame.notes.replace('"', "\"\""),
            iso_timestamp(frame.timestamp)
        ));
    }

    lines.join("\n")
}

/// `roll-{n}-{film-slug}-{yyyy-mm-dd}.{ext}`
pub fn export_filename(session: &RollSession, extension: &str) -> String {
    let slug = session
        .recommendation()
        .film
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!(
        "roll-{}-{}-{}.{}",
        session.roll_number(),
        slug,
        session.loaded_at().format("%Y-%m-%d"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FilmFormat, FilmType, LightCondition, Recommendation};
    use chrono::TimeZone;

    fn session() -> RollSession {
        let rec = Recommendation {
            film: "Ilford HP5 Plus 400".to_string(),
            ei: 1600,
            exposure: String::new(),
            adjustments: vec!["Push 2 stop(s) in development".to_string()],
        };
        let conditions = RollConditions { light: Some(LightCondition::Dark), ..Default::default() };
        let loaded = Utc.with_ymd_and_hms(2024, 11, 5, 18, 30, 0).unwrap();
        let mut s = RollSession::lock(7, rec, FilmFormat::Mm35, FilmType::Bw, conditions, loaded).unwrap();
        s.log_frame("f/2", "1/30", "neon, \"open\" sign", Utc.with_ymd_and_hms(2024, 11, 5, 19, 0, 0).unwrap());
        s
    }

    #[test]
    fn test_csv_layout() {
        let csv = export_csv(&session());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "# Roll 7 - Ilford HP5 Plus 400");
        assert_eq!(lines[1], "# ISO 1600 | 35mm B&W");
        assert_eq!(lines[2], "# Loaded: 2024-11-05");
        assert_eq!(lines[3], "# Frames: 1 of 36 logged");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Frame,Aperture,Shutter,Notes,Timestamp");
        assert_eq!(lines[6], "1,f/2,1/30,\"neon, \"\"open\"\" sign\",2024-11-05T19:00:00.000Z");
    }

    #[test]
    fn test_json_shape() {
        let exported = Utc.with_ymd_and_hms(2024, 11, 6, 8, 0, 0).unwrap();
        let json = export_json(&session(), exported).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["roll"]["iso"], 1600);
        assert_eq!(value["roll"]["type"], "B&W");
        assert_eq!(value["roll"]["framesLogged"], 1);
        assert_eq!(value["roll"]["exportedAt"], "2024-11-06T08:00:00.000Z");
        assert_eq!(value["conditions"]["light"], "dark");
        assert!(value["conditions"]["environment"].is_null());
        assert_eq!(value["frames"][0]["frameNumber"], 1);
        // Pretty-printed
        assert!(json.contains("\n  \"roll\""));
    }

    #[test]
    fn test_filename() {
        assert_eq!(export_filename(&session(), "csv"), "roll-7-ilford-hp5-plus-400-2024-11-05.csv");
    }
}
