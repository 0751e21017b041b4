//! Parsing and selection of the row-scheduling policy.
//!
//! The textual form mirrors OpenMP's `OMP_SCHEDULE` variable: a policy
//! name optionally followed by a comma and a chunk size, for example
//! `static`, `dynamic,4` or `guided,8`.  Unrecognized values never
//! abort a render; they fall back to the default policy.

use std::env;
use std::str::FromStr;

/// Environment variable consulted by `SchedulePolicy::from_env`.
pub const SCHEDULE_ENV: &str = "MANDEL_SCHEDULE";

/// How image rows are handed to the worker pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulePolicy {
    /// Contiguous chunks dealt round-robin before the render starts.
    /// Cheapest, but blind to uneven row cost.
    Static {
        /// Rows per chunk; `None` divides the image evenly across the
        /// pool.
        chunk: Option<usize>,
    },
    /// Workers claim the next chunk from a shared queue as they finish
    /// their current one.  More queue traffic, but adapts to rows of
    /// very different cost.
    Dynamic {
        /// Rows per claim.
        chunk: usize,
    },
    /// Claims start at the remaining-rows-per-worker size and shrink
    /// as the image is consumed, down to the given floor.
    Guided {
        /// Smallest claim ever handed out.
        min_chunk: usize,
    },
}

impl Default for SchedulePolicy {
    fn default() -> SchedulePolicy {
        SchedulePolicy::Static { chunk: None }
    }
}

impl SchedulePolicy {
    /// Parses the `OMP_SCHEDULE`-style textual form.  Returns `None`
    /// for anything unrecognized, including malformed chunk sizes;
    /// chunk values of zero are raised to one.
    pub fn parse(s: &str) -> Option<SchedulePolicy> {
        let mut parts = s.splitn(2, ',');
        let kind = parts.next()?.trim().to_ascii_lowercase();
        let chunk = match parts.next() {
            Some(text) => Some(usize::from_str(text.trim()).ok()?.max(1)),
            None => None,
        };
        match kind.as_str() {
            "static" => Some(SchedulePolicy::Static { chunk }),
            "dynamic" => Some(SchedulePolicy::Dynamic {
                chunk: chunk.unwrap_or(1),
            }),
            "guided" => Some(SchedulePolicy::Guided {
                min_chunk: chunk.unwrap_or(1),
            }),
            _ => None,
        }
    }

    /// Reads the policy from `MANDEL_SCHEDULE`.  A missing variable
    /// selects the default silently; an unparseable one is logged and
    /// then defaulted.
    pub fn from_env() -> SchedulePolicy {
        match env::var(SCHEDULE_ENV) {
            Ok(value) => SchedulePolicy::parse(&value).unwrap_or_else(|| {
                warn!(
                    "unrecognized {}={:?}, falling back to {:?}",
                    SCHEDULE_ENV,
                    value,
                    SchedulePolicy::default()
                );
                SchedulePolicy::default()
            }),
            Err(_) => SchedulePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_policy_names_parse() {
        assert_eq!(
            SchedulePolicy::parse("static"),
            Some(SchedulePolicy::Static { chunk: None })
        );
        assert_eq!(
            SchedulePolicy::parse("dynamic"),
            Some(SchedulePolicy::Dynamic { chunk: 1 })
        );
        assert_eq!(
            SchedulePolicy::parse("guided"),
            Some(SchedulePolicy::Guided { min_chunk: 1 })
        );
    }

    #[test]
    fn chunk_sizes_parse() {
        assert_eq!(
            SchedulePolicy::parse("static,8"),
            Some(SchedulePolicy::Static { chunk: Some(8) })
        );
        assert_eq!(
            SchedulePolicy::parse("dynamic,4"),
            Some(SchedulePolicy::Dynamic { chunk: 4 })
        );
        assert_eq!(
            SchedulePolicy::parse("guided, 2"),
            Some(SchedulePolicy::Guided { min_chunk: 2 })
        );
    }

    #[test]
    fn case_and_zero_chunks_are_tolerated() {
        assert_eq!(
            SchedulePolicy::parse("Dynamic,4"),
            Some(SchedulePolicy::Dynamic { chunk: 4 })
        );
        assert_eq!(
            SchedulePolicy::parse("static,0"),
            Some(SchedulePolicy::Static { chunk: Some(1) })
        );
    }

    #[test]
    fn junk_is_rejected() {
        assert_eq!(SchedulePolicy::parse(""), None);
        assert_eq!(SchedulePolicy::parse("fair"), None);
        assert_eq!(SchedulePolicy::parse("dynamic,many"), None);
        assert_eq!(SchedulePolicy::parse("static,"), None);
    }
}
