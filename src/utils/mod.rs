// Utility functions
pub mod text;

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Parse a comma-separated list of filter values
///
/// Blank input means the filter is absent and yields `None`.
pub fn parse_set<T>(input: &str) -> Result<Option<BTreeSet<T>>>
where
    T: FromStr<Err = Error> + Ord,
{
    let values = input
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(T::from_str)
        .collect::<Result<BTreeSet<T>>>()?;

    Ok((!values.is_empty()).then_some(values))
}
