//! Roll session
//!
//! A locked recommendation plus the frame-by-frame log for that roll. The
//! session is plain serde data; persisting it is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::types::{Environment, FilmFormat, FilmType, Intent, LightCondition, Recommendation};

const FRAMES_35MM: &[u16] = &[24, 36];
const FRAMES_120: &[u16] = &[12, 16];

/// Roll lengths a format can be loaded with
pub fn allowed_frame_counts(format: FilmFormat) -> &'static [u16] {
    match format {
        FilmFormat::Mm35 => FRAMES_35MM,
        FilmFormat::Medium120 => FRAMES_120,
    }
}

fn longest_roll(format: FilmFormat) -> u16 {
    allowed_frame_counts(format).iter().copied().max().unwrap_or(0)
}

/// Standard roll length: 36 exposures for 35mm, 12 for 120
pub fn default_frame_count(format: FilmFormat) -> u16 {
    match format {
        FilmFormat::Mm35 => 36,
        FilmFormat::Medium120 => 12,
    }
}

/// Conditions the roll was planned for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollConditions {
    pub light: Option<LightCondition>,
    pub environment: Option<Environment>,
    pub intent: Option<Intent>,
}

/// What was shot on one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLog {
    pub frame_number: u16,
    #[serde(default)]
    pub aperture: String,
    #[serde(default)]
    pub shutter: String,
    #[serde(default)]
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

impl FrameLog {
    fn is_empty(&self) -> bool {
        self.aperture.is_empty() && self.shutter.is_empty() && self.notes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRollSession")]
pub struct RollSession {
    roll_number: u32,
    recommendation: Recommendation,
    format: FilmFormat,
    film_type: FilmType,
    conditions: RollConditions,
    loaded_at: DateTime<Utc>,
    total_frames: u16,
    current_frame: u16,
    frame_log: Vec<FrameLog>,
}

/// Wire shape of a session before its invariants are checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRollSession {
    roll_number: u32,
    recommendation: Recommendation,
    format: FilmFormat,
    film_type: FilmType,
    #[serde(default)]
    conditions: RollConditions,
    loaded_at: DateTime<Utc>,
    total_frames: u16,
    current_frame: u16,
    #[serde(default)]
    frame_log: Vec<FrameLog>,
}

impl TryFrom<RawRollSession> for RollSession {
    type Error = PlannerError;

    fn try_from(raw: RawRollSession) -> PlannerResult<Self> {
        if raw.recommendation.is_placeholder() {
            return Err(PlannerError::NoFilmAvailable);
        }
        let total = raw.total_frames;
        if !allowed_frame_counts(raw.format).contains(&total) {
            return Err(PlannerError::InvalidFrameCount {
                format: raw.format,
                requested: total,
            });
        }
        if raw.current_frame == 0 || raw.current_frame > total {
            return Err(PlannerError::FrameOutOfRange {
                frame: raw.current_frame,
                total,
            });
        }

        let mut frame_log = raw.frame_log;
        frame_log.sort_by_key(|l| l.frame_number);
        for pair in frame_log.windows(2) {
            if pair[0].frame_number == pair[1].frame_number {
                return Err(PlannerError::DuplicateFrame(pair[0].frame_number));
            }
        }
        // Logs past a shortened roll's end survive, up to the format's longest roll
        let longest = longest_roll(raw.format);
        if let Some(bad) = frame_log.iter().find(|l| l.frame_number == 0 || l.frame_number > longest) {
            return Err(PlannerError::FrameOutOfRange {
                frame: bad.frame_number,
                total: longest,
            });
        }

        Ok(Self {
            roll_number: raw.roll_number,
            recommendation: raw.recommendation,
            format: raw.format,
            film_type: raw.film_type,
            conditions: raw.conditions,
            loaded_at: raw.loaded_at,
            total_frames: total,
            current_frame: raw.current_frame,
            frame_log,
        })
    }
}

impl RollSession {
    /// Load a roll with the recommended stock. The "no film available"
    /// placeholder cannot be loaded.
    pub fn lock(
        roll_number: u32,
        recommendation: Recommendation,
        format: FilmFormat,
        film_type: FilmType,
        conditions: RollConditions,
        loaded_at: DateTime<Utc>,
    ) -> PlannerResult<Self> {
        if recommendation.is_placeholder() {
            return Err(PlannerError::NoFilmAvailable);
        }
        tracing::debug!(roll_number, film = %recommendation.film, "Roll locked");

        Ok(Self {
            roll_number,
            recommendation,
            format,
            film_type,
            conditions,
            loaded_at,
            total_frames: default_frame_count(format),
            current_frame: 1,
            frame_log: Vec::new(),
        })
    }

    pub fn roll_number(&self) -> u32 {
        self.roll_number
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    pub fn format(&self) -> FilmFormat {
        self.format
    }

    pub fn film_type(&self) -> FilmType {
        self.film_type
    }

    pub fn conditions(&self) -> &RollConditions {
        &self.conditions
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn total_frames(&self) -> u16 {
        self.total_frames
    }

    pub fn current_frame(&self) -> u16 {
        self.current_frame
    }

    /// Logged frames, ordered by frame number
    pub fn frame_log(&self) -> &[FrameLog] {
        &self.frame_log
    }

    pub fn frames_logged(&self) -> usize {
        self.frame_log.len()
    }

    pub fn log_for(&self, frame: u16) -> Option<&FrameLog> {
        self.frame_log
            .binary_search_by_key(&frame, |l| l.frame_number)
            .ok()
            .map(|i| &self.frame_log[i])
    }

    /// Change the roll length; the current frame is clamped to the new end
    pub fn set_total_frames(&mut self, total: u16) -> PlannerResult<()> {
        if !allowed_frame_counts(self.format).contains(&total) {
            return Err(PlannerError::InvalidFrameCount {
                format: self.format,
                requested: total,
            });
        }
        self.total_frames = total;
        self.current_frame = self.current_frame.min(total);
        Ok(())
    }

    /// Move to the next frame. Returns false at the end of the roll.
    pub fn advance(&mut self) -> bool {
        if self.current_frame < self.total_frames {
            self.current_frame += 1;
            true
        } else {
            false
        }
    }

    /// Move back one frame. Returns false on frame 1.
    pub fn previous(&mut self) -> bool {
        if self.current_frame > 1 {
            self.current_frame -= 1;
            true
        } else {
            false
        }
    }

    /// Record settings for the current frame
    pub fn log_frame(&mut self, aperture: &str, shutter: &str, notes: &str, at: DateTime<Utc>) {
        let frame = self.current_frame;
        self.upsert(frame, aperture, shutter, notes, at);
    }

    /// Record settings for any frame on the roll
    pub fn log_frame_at(
        &mut self,
        frame: u16,
        aperture: &str,
        shutter: &str,
        notes: &str,
        at: DateTime<Utc>,
    ) -> PlannerResult<()> {
        if frame == 0 || frame > self.total_frames {
            return Err(PlannerError::FrameOutOfRange {
                frame,
                total: self.total_frames,
            });
        }
        self.upsert(frame, aperture, shutter, notes, at);
        Ok(())
    }

    fn upsert(&mut self, frame: u16, aperture: &str, shutter: &str, notes: &str, at: DateTime<Utc>) {
        let log = FrameLog {
            frame_number: frame,
            aperture: aperture.trim().to_string(),
            shutter: shutter.trim().to_string(),
            notes: notes.trim().to_string(),
            timestamp: at,
        };

        match self.frame_log.binary_search_by_key(&frame, |l| l.frame_number) {
            // An all-empty entry clears the frame
            Ok(i) if log.is_empty() => {
                self.frame_log.remove(i);
            }
            Ok(i) => self.frame_log[i] = log,
            Err(_) if log.is_empty() => {}
            Err(i) => self.frame_log.insert(i, log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn session(format: FilmFormat) -> RollSession {
        let rec = Recommendation {
            film: "Kodak Portra 400".to_string(),
            ei: 400,
            exposure: "Meter for midtones. Slight overexposure is safe.".to_string(),
            adjustments: Vec::new(),
        };
        RollSession::lock(3, rec, format, FilmType::Color, RollConditions::default(), at(9)).unwrap()
    }

    #[test]
    fn test_lock_defaults() {
        let s = session(FilmFormat::Mm35);
        assert_eq!(s.total_frames(), 36);
        assert_eq!(s.current_frame(), 1);
        assert_eq!(session(FilmFormat::Medium120).total_frames(), 12);
    }

    #[test]
    fn test_lock_refuses_placeholder() {
        let err = RollSession::lock(
            1,
            Recommendation::no_film_available(),
            FilmFormat::Mm35,
            FilmType::Bw,
            RollConditions::default(),
            at(9),
        )
        .unwrap_err();
        assert_eq!(err, PlannerError::NoFilmAvailable);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut s = session(FilmFormat::Medium120);
        assert!(!s.previous());
        for _ in 0..11 {
            assert!(s.advance());
        }
        assert_eq!(s.current_frame(), 12);
        assert!(!s.advance());
        assert!(s.previous());
        assert_eq!(s.current_frame(), 11);
    }

    #[test]
    fn test_set_total_frames() {
        let mut s = session(FilmFormat::Mm35);
        for _ in 0..30 {
            s.advance();
        }
        assert_eq!(s.current_frame(), 31);
        s.set_total_frames(24).unwrap();
        assert_eq!(s.current_frame(), 24);

        let err = s.set_total_frames(12).unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidFrameCount {
                format: FilmFormat::Mm35,
                requested: 12
            }
        );
        assert_eq!(s.total_frames(), 24);
    }

    #[test]
    fn test_log_upsert_and_clear() {
        let mut s = session(FilmFormat::Mm35);
        s.advance();
        s.advance();
        s.log_frame("f/8", "1/125", "", at(10));
        s.previous();
        s.log_frame("f/4", "1/60", "doorway", at(11));
        assert_eq!(s.frames_logged(), 2);
        // Sorted by frame regardless of logging order
        assert_eq!(s.frame_log()[0].frame_number, 2);
        assert_eq!(s.frame_log()[1].frame_number, 3);

        // Overwrite
        s.log_frame("f/5.6", "1/60", "doorway", at(12));
        assert_eq!(s.log_for(2).unwrap().aperture, "f/5.6");

        // Empty log removes the entry
        s.log_frame(" ", "", "", at(13));
        assert!(s.log_for(2).is_none());
        assert_eq!(s.frames_logged(), 1);
    }

    #[test]
    fn test_log_frame_at_bounds() {
        let mut s = session(FilmFormat::Medium120);
        assert!(s.log_frame_at(12, "f/11", "1/250", "", at(10)).is_ok());
        let err = s.log_frame_at(13, "f/11", "1/250", "", at(10)).unwrap_err();
        assert_eq!(
            err,
            PlannerError::FrameOutOfRange {
                frame: 13,
                total: 12
            }
        );
        assert!(s.log_frame_at(0, "f/11", "", "", at(10)).is_err());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut s = session(FilmFormat::Mm35);
        s.log_frame("f/8", "1/250", "first light", at(10));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"currentFrame\":1"));
        let restored: RollSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, s);
    }

    fn saved_state(total: u16, current: u16, frames: &[u16]) -> serde_json::Value {
        let mut value = serde_json::to_value(session(FilmFormat::Mm35)).unwrap();
        value["totalFrames"] = total.into();
        value["currentFrame"] = current.into();
        value["frameLog"] = frames
            .iter()
            .map(|&n| {
                serde_json::json!({
                    "frameNumber": n,
                    "aperture": "f/8",
                    "shutter": "1/125",
                    "notes": "",
                    "timestamp": "2024-06-01T10:00:00Z"
                })
            })
            .collect();
        value
    }

    #[test]
    fn test_restore_rejects_bad_roll_length_and_position() {
        let err = serde_json::from_value::<RollSession>(saved_state(7, 1, &[])).unwrap_err();
        assert!(err.to_string().contains("not a valid roll length"));

        let err = serde_json::from_value::<RollSession>(saved_state(36, 0, &[])).unwrap_err();
        assert!(err.to_string().contains("frame 0 is outside the roll"));

        assert!(serde_json::from_value::<RollSession>(saved_state(24, 25, &[])).is_err());
    }

    #[test]
    fn test_restore_rejects_bad_log_entries() {
        let err = serde_json::from_value::<RollSession>(saved_state(24, 1, &[3, 40])).unwrap_err();
        assert!(err.to_string().contains("frame 40 is outside the roll (1-36)"));

        let err = serde_json::from_value::<RollSession>(saved_state(24, 1, &[4, 2, 4])).unwrap_err();
        assert!(err.to_string().contains("frame 4 is logged more than once"));
    }

    #[test]
    fn test_restore_sorts_frame_log() {
        let mut s: RollSession = serde_json::from_value(saved_state(36, 3, &[5, 2])).unwrap();
        assert_eq!(s.log_for(2).unwrap().aperture, "f/8");
        assert_eq!(s.log_for(5).unwrap().aperture, "f/8");

        s.log_frame("f/2", "1/30", "", at(11));
        let frames: Vec<u16> = s.frame_log().iter().map(|l| l.frame_number).collect();
        assert_eq!(frames, vec![2, 3, 5]);
    }

    #[test]
    fn test_restore_keeps_logs_past_shortened_end() {
        let mut s = session(FilmFormat::Mm35);
        s.log_frame_at(30, "f/8", "1/250", "", at(10)).unwrap();
        s.set_total_frames(24).unwrap();

        let json = serde_json::to_string(&s).unwrap();
        let restored: RollSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.total_frames(), 24);
        assert!(restored.log_for(30).is_some());
    }

    #[test]
    fn test_restore_rejects_placeholder() {
        let mut value = saved_state(36, 1, &[]);
        value["recommendation"] = serde_json::to_value(Recommendation::no_film_available()).unwrap();
        assert!(serde_json::from_value::<RollSession>(value).is_err());
    }
}
