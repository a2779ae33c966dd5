//! Quiz score calculation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ColdReadsError, Result};

/// Letter grade derived from a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Rounded percentage (0-100)
    pub percentage: u8,
    pub correct: u32,
    pub total: u32,
    pub grade: Grade,
}

/// Map a percentage onto the fixed grade table
pub fn grade_for(percentage: u8) -> Grade {
    match percentage {
        90.. => Grade::A,
        80..=89 => Grade::B,
        70..=79 => Grade::C,
        60..=69 => Grade::D,
        _ => Grade::F,
    }
}

/// Score `correct` answers out of `total` questions
///
/// The percentage is rounded half-up, so 2 of 3 gives 67 and 1 of 8
/// (12.5%) gives 13.
pub fn calculate_score(correct: u32, total: u32) -> Result<ScoreResult> {
    if total == 0 {
        return Err(ColdReadsError::InvalidArgument(
            "total questions must be greater than zero".to_string(),
        ));
    }
    if correct > total {
        return Err(ColdReadsError::InvalidArgument(format!(
            "correct answers ({correct}) exceed total questions ({total})"
        )));
    }

    let (correct_wide, total_wide) = (u64::from(correct), u64::from(total));
    let rounded = (correct_wide * 200 + total_wide) / (total_wide * 2);
    // correct <= total keeps this within 0..=100
    let percentage = rounded as u8;

    Ok(ScoreResult { percentage, correct, total, grade: grade_for(percentage) })
}
