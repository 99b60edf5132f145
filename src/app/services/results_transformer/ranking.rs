//! Seed rank computation
//!
//! Ranks seed times ascending within each event using competition ("min")
//! ranking: tied values share the lowest rank and the next rank skips, so
//! `[10, 20, 20, 30]` ranks `[1, 2, 2, 4]`. Missing seeds rank after every
//! present seed in their group, all at `present + 1`.
//!
//! Rows that repeat the same entry (prelim and final of one swimmer) are
//! ranked once and share the rank. Entries are identified by the group value
//! plus the entry key columns; a row with a null key component is its own
//! entry.

use polars::prelude::*;
use tracing::debug;

use super::{is_numeric_dtype, require_column};
use crate::constants::columns;
use crate::error::{Error, Result};

const ROW_INDEX: &str = "__seed_rank_row";
const SEED: &str = "__seed_rank_seed";
const ENTRY_SEED: &str = "__seed_rank_entry_seed";
const ROW_RANK: &str = "__seed_rank_row_rank";

/// Add a UInt32 `seed_rank` column ranking `rank_column` within `group_column`.
///
/// The rank column must be numeric unless the frame is empty. Run time
/// normalization first: raw time strings fail this check.
///
/// # Arguments
///
/// * `df` - Frame to rank; gains the `seed_rank` column
/// * `group_column` - Column whose values partition the ranking, usually `event_no`
/// * `rank_column` - Numeric seed column, ranked ascending
/// * `entry_columns` - Columns identifying one entry within a group; an empty
///   slice ranks every row on its own
///
/// # Returns
///
/// `Ok(())` once the column is added, `Error::ColumnNotFound` for a missing
/// column, or `Error::RankPrecondition` when the seed column is not numeric
pub fn compute_seed_ranks(
    df: &mut DataFrame,
    group_column: &str,
    rank_column: &str,
    entry_columns: &[&str],
) -> Result<()> {
    require_column(df, group_column)?;
    let seeds = require_column(df, rank_column)?;
    for name in entry_columns {
        require_column(df, name)?;
    }

    if df.height() == 0 {
        df.with_column(Column::new(columns::SEED_RANK.into(), Vec::<u32>::new()))?;
        return Ok(());
    }

    if !is_numeric_dtype(seeds.dtype()) {
        return Err(Error::rank_precondition(rank_column, seeds.dtype()));
    }

    // A row with a null key component is keyed by its own row index
    let unkeyed = entry_columns
        .iter()
        .map(|name| col(*name).is_null())
        .reduce(|left, right| left.or(right))
        .unwrap_or(lit(true));
    let mut entry = vec![col(group_column)];
    entry.extend(entry_columns.iter().map(|name| col(*name)));
    entry.push(
        when(unkeyed)
            .then(col(ROW_INDEX))
            .otherwise(lit(NULL).cast(DataType::UInt32)),
    );
    let group = [col(group_column)];

    let ranked = df
        .clone()
        .lazy()
        .with_row_index(ROW_INDEX, None)
        .with_column(
            col(rank_column)
                .cast(DataType::Float64)
                .fill_nan(lit(NULL))
                .alias(SEED),
        )
        // Only the first row of an entry takes part in the ranking
        .with_column(
            when(col(ROW_INDEX).eq(col(ROW_INDEX).min().over(&entry)))
                .then(col(SEED))
                .otherwise(lit(NULL).cast(DataType::Float64))
                .alias(ENTRY_SEED),
        )
        .with_column(
            col(ENTRY_SEED)
                .rank(
                    RankOptions {
                        method: RankMethod::Min,
                        descending: false,
                    },
                    None,
                )
                .over(group.clone())
                .cast(DataType::UInt32)
                .fill_null(
                    (col(ENTRY_SEED).count().over(group) + lit(1))
                        .cast(DataType::UInt32),
                )
                .alias(ROW_RANK),
        )
        .select([col(ROW_RANK)
            .first()
            .over(&entry)
            .cast(DataType::UInt32)
            .alias(columns::SEED_RANK)])
        .collect()?;

    df.with_column(ranked.column(columns::SEED_RANK)?.clone())?;
    debug!("Ranked {} rows by {} within {}", df.height(), rank_column, group_column);
    Ok(())
}
