//! Resolution of point selections to centroids.

use std::fmt;
use std::str::FromStr;

use align_math::calculate_centroid;
use nalgebra::Vector3;

use crate::error::{AlignError, AlignResult};
use crate::point_set::PointSet;

/// A group of points used to derive a direction or an origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every point in the set
    AllPoints,
    /// Non-empty list of 1-based point identifiers
    Explicit(Vec<usize>),
}

impl Selection {
    /// Explicit selection; rejects an empty list.
    pub fn explicit(ids: Vec<usize>) -> AlignResult<Self> {
        if ids.is_empty() {
            return Err(AlignError::EmptySelection);
        }
        Ok(Selection::Explicit(ids))
    }

    /// Builds a selection from command-line tokens.
    ///
    /// `all` must appear on its own; otherwise every token is an identifier.
    pub fn from_tokens(tokens: &[SelectionToken]) -> AlignResult<Self> {
        match tokens {
            [] => Err(AlignError::EmptySelection),
            [SelectionToken::All] => Ok(Selection::AllPoints),
            _ => tokens
                .iter()
                .map(|t| match t {
                    SelectionToken::Id(id) => Ok(*id),
                    SelectionToken::All => Err(AlignError::InvalidSelection(
                        "'all' cannot be combined with atom numbers".to_string(),
                    )),
                })
                .collect::<AlignResult<Vec<_>>>()
                .and_then(Selection::explicit),
        }
    }

    /// Resolves to 1-based identifiers, checking each against the set.
    pub fn resolve(&self, set: &PointSet) -> AlignResult<Vec<usize>> {
        match self {
            Selection::AllPoints => Ok((1..=set.len()).collect()),
            Selection::Explicit(ids) if ids.is_empty() => Err(AlignError::EmptySelection),
            Selection::Explicit(ids) => {
                for &id in ids {
                    if set.get(id).is_none() {
                        return Err(AlignError::SelectionNotFound {
                            id,
                            count: set.len(),
                        });
                    }
                }
                Ok(ids.clone())
            }
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::AllPoints => write!(f, "all atoms"),
            Selection::Explicit(ids) => {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "atoms {}", ids.join(" "))
            }
        }
    }
}

/// One command-line selection word: `all` or a positive atom number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionToken {
    All,
    Id(usize),
}

impl FromStr for SelectionToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(SelectionToken::All);
        }
        match s.parse::<usize>() {
            Ok(0) => Err("atom numbers start at 1".to_string()),
            Ok(id) => Ok(SelectionToken::Id(id)),
            Err(_) => Err(format!("expected 'all' or an atom number, got '{s}'")),
        }
    }
}

/// Points picked by a selection, with their centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPoints {
    /// 1-based identifiers, in selection order
    pub ids: Vec<usize>,
    pub centroid: Vector3<f64>,
}

/// Resolves a selection against the current positions of `set`.
///
/// Selecting all points of an empty set gives the zero vector as centroid.
pub fn select(set: &PointSet, selection: &Selection) -> AlignResult<SelectedPoints> {
    select_combined(set, &[selection])
}

/// Resolves several selections as one group.
///
/// Member lists are concatenated, so a point named by two selections counts
/// twice toward the centroid.
pub fn select_combined(set: &PointSet, selections: &[&Selection]) -> AlignResult<SelectedPoints> {
    let mut ids = Vec::new();
    for selection in selections {
        ids.extend(selection.resolve(set)?);
    }

    let positions: Vec<Vector3<f64>> = ids
        .iter()
        .filter_map(|&id| set.get(id).map(|p| p.position))
        .collect();
    let centroid = calculate_centroid(&positions).unwrap_or_else(|_| Vector3::zeros());

    Ok(SelectedPoints { ids, centroid })
}
