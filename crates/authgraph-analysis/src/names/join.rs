//! Name Joiner: inner join of rank entries with preferred names.

use std::io::Write;

use authgraph_core::types::FxHashMap;

use crate::rank::{RankEntry, Score};
use crate::tsv::TsvWriter;

use super::PreferredName;

/// One row of the final table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedName {
    pub id: String,
    pub score: Score,
    pub label: String,
    pub kind: String,
}

/// Keep rank entries that have a name, sorted by score descending.
/// Equal scores keep their rank-file order.
pub fn join_names(
    ranks: Vec<RankEntry>,
    names: &FxHashMap<String, PreferredName>,
) -> Vec<RankedName> {
    let mut rows: Vec<RankedName> = ranks
        .into_iter()
        .filter_map(|entry| {
            names.get(&entry.id).map(|name| RankedName {
                id: entry.id,
                score: entry.score,
                label: name.label.clone(),
                kind: name.kind.clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.score.value().total_cmp(&a.score.value()));
    rows
}

/// Write `id\tscore\tlabel\tkind` rows.
pub fn write_ranked<W: Write>(
    rows: &[RankedName],
    writer: &mut TsvWriter<W>,
) -> std::io::Result<()> {
    for row in rows {
        writer.write_row(&[
            row.id.as_str(),
            row.score.as_str(),
            row.label.as_str(),
            row.kind.as_str(),
        ])?;
    }
    Ok(())
}
