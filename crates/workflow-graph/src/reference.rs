//! Parsing of successor references such as `"train"` or `"train(4)"`.
//!
//! Parsing is lenient. A `name(k)` suffix with integer `k` always strips to
//! `name`; `k` below 1 is raised to rank 1. Any other shape is taken
//! verbatim as a name with rank 1.

use std::fmt;
use std::num::IntErrorKind;

/// Largest rank a workflow may declare for a single action.
///
/// Every instance of a ranked predecessor becomes its own identifier, so the
/// bound caps the size of a resolved predecessor list.
pub const MAX_RANK: u32 = 10_000;

/// A parsed successor reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionRef {
    /// Base action name, without the rank suffix.
    pub name: String,
    /// Declared number of parallel instances. Always at least 1.
    pub rank: u32,
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank > 1 {
            write!(f, "{}({})", self.name, self.rank)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Parse a successor reference into its base name and rank.
///
/// Malformed rank syntax never fails; it yields rank 1 and keeps the whole
/// input as the name. Ranks above [`MAX_RANK`] are returned as declared and
/// rejected when the graph is built.
#[must_use]
pub fn parse_reference(input: &str) -> ActionRef {
    let mut parts = input.split('(');
    let (Some(name), Some(suffix), None) = (parts.next(), parts.next(), parts.next()) else {
        return ActionRef::unranked(input);
    };

    match suffix.strip_suffix(')').and_then(parse_rank) {
        Some(rank) => ActionRef {
            name: name.to_string(),
            rank,
        },
        None => ActionRef::unranked(input),
    }
}

/// Parse the content between the parentheses as a rank, clamped to `1..=u32::MAX`.
fn parse_rank(digits: &str) -> Option<u32> {
    match digits.trim().parse::<i64>() {
        Ok(value) => Some(u32::try_from(value.max(1)).unwrap_or(u32::MAX)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(u32::MAX),
            IntErrorKind::NegOverflow => Some(1),
            _ => None,
        },
    }
}

impl ActionRef {
    fn unranked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rank: 1,
        }
    }
}
