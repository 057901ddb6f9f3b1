use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::logger::{info, warn};

/// Result of one insert attempt. A failed row carries the rendered error so
/// the outcome stays inspectable after the database handle is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted(String),
    Failed(String, String),
}

impl RowOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, RowOutcome::Inserted(_))
    }
}

/// Read the input file into memory and split it into lines. Blank lines are
/// kept (they become empty-string insert attempts); the trailing newline does
/// not produce a phantom extra line.
pub fn read_emails(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(split_lines(&data))
}

pub fn split_lines(data: &str) -> Vec<String> {
    data.lines().map(str::to_string).collect()
}

/// Trim one line and run the insert closure on it.
pub fn attempt<F>(insert: &mut F, line: &str) -> RowOutcome
where
    F: FnMut(&str) -> Result<()>,
{
    let email = line.trim();
    match insert(email) {
        Ok(()) => RowOutcome::Inserted(email.to_string()),
        Err(err) => RowOutcome::Failed(email.to_string(), format!("{:#}", err)),
    }
}

/// Drive every line through `attempt`, printing the transcript line for each
/// row as it resolves. Every line is attempted exactly once; a failure never
/// stops the loop.
pub fn run<F>(lines: &[String], mut insert: F) -> Vec<RowOutcome>
where
    F: FnMut(&str) -> Result<()>,
{
    lines
        .iter()
        .map(|line| {
            let outcome = attempt(&mut insert, line);
            report(&outcome);
            outcome
        })
        .collect()
}

fn report(outcome: &RowOutcome) {
    match outcome {
        RowOutcome::Inserted(email) => {
            println!("Email inserted successfully: {}", email);
            info(&format!("inserted: {}", email));
        }
        RowOutcome::Failed(email, err) => {
            println!("Error inserting email {}: {}", email, err);
            warn(&format!("insert failed for {}: {}", email, err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn trailing_newline_is_not_a_phantom_line() {
        assert_eq!(split_lines("a@b.com\nb@c.com\n"), vec!["a@b.com", "b@c.com"]);
    }

    #[test]
    fn blank_lines_are_kept() {
        assert_eq!(split_lines("a@b.com\n\nb@c.com"), vec!["a@b.com", "", "b@c.com"]);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn attempt_trims_surrounding_whitespace() {
        let mut seen = Vec::new();
        let mut insert = |email: &str| {
            seen.push(email.to_string());
            Ok(())
        };
        let outcome = attempt(&mut insert, " a@b.com \t");
        assert_eq!(outcome, RowOutcome::Inserted("a@b.com".to_string()));
        assert_eq!(seen, vec!["a@b.com"]);
    }

    #[test]
    fn blank_line_is_attempted_as_empty_string() {
        let mut count = 0;
        let mut insert = |email: &str| {
            count += 1;
            assert_eq!(email, "");
            Ok(())
        };
        attempt(&mut insert, "   ");
        assert_eq!(count, 1);
    }

    #[test]
    fn every_line_is_attempted_exactly_once() {
        let lines: Vec<String> = ["a@b.com", "", "bad", "c@d.com"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut attempts = 0;
        let outcomes = run(&lines, |email| {
            attempts += 1;
            if email == "bad" {
                Err(anyhow!("duplicate key value violates unique constraint"))
            } else {
                Ok(())
            }
        });
        assert_eq!(attempts, 4);
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes[0].is_inserted());
        assert!(outcomes[1].is_inserted());
        assert!(!outcomes[2].is_inserted());
        assert!(outcomes[3].is_inserted());
    }

    #[test]
    fn failed_outcome_carries_value_and_error() {
        let outcomes = run(&["x@y.z".to_string()], |_| Err(anyhow!("boom")));
        match &outcomes[0] {
            RowOutcome::Failed(value, err) => {
                assert_eq!(value, "x@y.z");
                assert!(err.contains("boom"));
            }
            other => panic!("expected a failed outcome, got {:?}", other),
        }
    }
}
