use std::collections::{HashMap, HashSet};

use polars::prelude::*;

use crate::error::{PipelineError, Result};

/// Apply a column-label rename mapping as a single batch.
///
/// Unmapped columns pass through unchanged. The batch form makes swap
/// mappings (`A -> B`, `B -> A`) well-defined; a mapping that would leave
/// two columns with the same label is rejected instead of producing an
/// ambiguous table.
pub fn rename_columns(df: &DataFrame, mapping: &HashMap<String, String>) -> Result<DataFrame> {
    if mapping.is_empty() {
        return Ok(df.clone());
    }

    let old_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let new_names: Vec<String> = old_names
        .iter()
        .map(|name| mapping.get(name).cloned().unwrap_or_else(|| name.clone()))
        .collect();

    let mut seen: HashSet<&str> = HashSet::with_capacity(new_names.len());
    let mut collisions: Vec<String> = Vec::new();
    for name in &new_names {
        if !seen.insert(name.as_str()) {
            collisions.push(name.clone());
        }
    }
    if !collisions.is_empty() {
        return Err(PipelineError::RenameCollision { labels: collisions });
    }

    Ok(df.clone().lazy().rename(&old_names, &new_names, true).collect()?)
}

/// Replace every value in `column` with its absolute value.
///
/// Unconditional and idempotent: a second application is a no-op.
pub fn correct_sign(df: &DataFrame, column: &str) -> Result<DataFrame> {
    ensure_column(df, column)?;

    Ok(df
        .clone()
        .lazy()
        .with_column(
            when(col(column).lt(lit(0.0)))
                .then(col(column) * lit(-1.0))
                .otherwise(col(column))
                .alias(column),
        )
        .collect()?)
}

/// Normalize categorical values in `column` against a rename mapping.
///
/// Values absent from the mapping are preserved verbatim; unknown
/// categories are data, not errors.
pub fn normalize_categories(
    df: &DataFrame,
    column: &str,
    mapping: &HashMap<String, String>,
) -> Result<DataFrame> {
    ensure_column(df, column)?;

    if mapping.is_empty() {
        return Ok(df.clone());
    }

    let mut expr = col(column);
    for (alias, canonical) in mapping {
        expr = when(col(column).eq(lit(alias.clone())))
            .then(lit(canonical.clone()))
            .otherwise(expr);
    }

    Ok(df
        .clone()
        .lazy()
        .with_column(expr.alias(column))
        .collect()?)
}

pub(crate) fn ensure_column(df: &DataFrame, column: &str) -> Result<()> {
    if df.get_column_names().iter().any(|name| name.as_str() == column) {
        Ok(())
    } else {
        Err(PipelineError::MissingColumn {
            column: column.to_string(),
        })
    }
}
