//! Schedule analysis port.
//!
//! An [`Analyst`] answers free-form questions about the board. The board
//! never depends on one succeeding: [`consult`] turns every failure into a
//! fixed message the operator can read.

use serde::Serialize;

use crate::{
    board::Board,
    model::{Job, Material},
};

/// Shown when no analyst is configured or it has no credentials.
pub const MISSING_CREDENTIALS: &str = "API Key is missing. Please check your configuration.";

/// Shown when the analyst failed to answer.
pub const ANALYSIS_FAILED: &str =
    "Sorry, I encountered an error while analyzing the production data.";

/// Shown when the analyst answered with nothing.
pub const EMPTY_ANSWER: &str =
    "I processed the data but couldn't generate a meaningful response.";

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("transport error: {0}")]
    Transport(String),
}

/// The slice of board state handed to an analyst.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub jobs: &'a [Job],
    pub materials: &'a [Material],
}

impl<'a> Snapshot<'a> {
    pub fn of(board: &'a Board) -> Self {
        Self {
            jobs: &board.jobs,
            materials: &board.materials,
        }
    }
}

/// Something that can answer questions about a snapshot.
pub trait Analyst {
    fn analyze(&self, query: &str, snapshot: &Snapshot<'_>) -> Result<String, AnalysisError>;
}

/// Asks `analyst` about the board, degrading every failure to a message.
pub fn consult(analyst: Option<&dyn Analyst>, query: &str, board: &Board) -> String {
    let Some(analyst) = analyst else {
        return MISSING_CREDENTIALS.to_string();
    };

    match analyst.analyze(query, &Snapshot::of(board)) {
        Ok(answer) if answer.trim().is_empty() => EMPTY_ANSWER.to_string(),
        Ok(answer) => answer,
        Err(AnalysisError::MissingCredentials) => MISSING_CREDENTIALS.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "analysis failed");
            ANALYSIS_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    struct Canned(Result<&'static str, &'static str>);

    impl Analyst for Canned {
        fn analyze(&self, _query: &str, snapshot: &Snapshot<'_>) -> Result<String, AnalysisError> {
            match self.0 {
                Ok(text) => Ok(format!("{text} ({} jobs)", snapshot.jobs.len())),
                Err(e) => Err(AnalysisError::Transport(e.to_string())),
            }
        }
    }

    struct NoKey;

    impl Analyst for NoKey {
        fn analyze(&self, _: &str, _: &Snapshot<'_>) -> Result<String, AnalysisError> {
            Err(AnalysisError::MissingCredentials)
        }
    }

    struct Silent;

    impl Analyst for Silent {
        fn analyze(&self, _: &str, _: &Snapshot<'_>) -> Result<String, AnalysisError> {
            Ok("  ".to_string())
        }
    }

    fn board() -> Board {
        Board {
            jobs: vec![Job::new("Batch 204", "Tesla", date(2023, 10, 30))],
            ..Board::default()
        }
    }

    #[test]
    fn passes_answer_through() {
        let answer = consult(Some(&Canned(Ok("Cooling is the bottleneck"))), "why?", &board());
        assert_eq!(answer, "Cooling is the bottleneck (1 jobs)");
    }

    #[test]
    fn no_analyst_means_missing_credentials() {
        assert_eq!(consult(None, "why?", &board()), MISSING_CREDENTIALS);
        assert_eq!(consult(Some(&NoKey), "why?", &board()), MISSING_CREDENTIALS);
    }

    #[test]
    fn transport_failure_degrades() {
        let answer = consult(Some(&Canned(Err("timeout"))), "why?", &board());
        assert_eq!(answer, ANALYSIS_FAILED);
    }

    #[test]
    fn empty_answer_degrades() {
        assert_eq!(consult(Some(&Silent), "why?", &board()), EMPTY_ANSWER);
    }

    #[test]
    fn snapshot_serializes_jobs_and_materials() {
        let board = board();
        let json = serde_json::to_value(Snapshot::of(&board)).unwrap();
        assert_eq!(json["jobs"][0]["client"], "Tesla");
        assert!(json["materials"].as_array().unwrap().is_empty());
    }
}
