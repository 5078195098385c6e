//! Domain errors
//!
//! Loading helpers (catalog, weight table) return `anyhow::Result` with context;
//! these variants cover the failures callers are expected to branch on.

use thiserror::Error;

use crate::types::{FilmFormat, FilmType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    /// Guidance-by-name lookup for a key that is not in the catalog
    #[error("film '{0}' not found in catalog")]
    UnknownFilm(String),

    /// Guidance-by-name for a stock of the other film type
    #[error("{film} is not a {} film", .requested.display_text())]
    FilmTypeMismatch { film: String, requested: FilmType },

    /// A roll cannot be loaded from the "no film available" placeholder
    #[error("no film available for the selected type and format")]
    NoFilmAvailable,

    #[error("{requested} frames is not a valid roll length for {format}")]
    InvalidFrameCount { format: FilmFormat, requested: u16 },

    #[error("frame {frame} is outside the roll (1-{total})")]
    FrameOutOfRange { frame: u16, total: u16 },

    /// Restored roll state logs the same frame twice
    #[error("frame {0} is logged more than once")]
    DuplicateFrame(u16),

    /// Catalog entry violates a FilmStock invariant
    #[error("invalid catalog entry: {0}")]
    Catalog(String),
}

pub type PlannerResult<T> = std::result::Result<T, PlannerError>;
