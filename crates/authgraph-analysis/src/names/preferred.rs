//! Preferred-name extraction over the Record Store.

use std::io::{BufRead, Write};

use authgraph_core::errors::{GraphError, ParseError, StorageError};
use authgraph_core::types::{FxHashMap, Record};
use authgraph_storage::RecordStore;
use regex::Regex;

use crate::pattern;
use crate::tsv::{self, TsvWriter};

/// `(id, label, kind)` for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredName {
    pub id: String,
    pub label: String,
    pub kind: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameStats {
    pub records: usize,
    pub named: usize,
    pub unnamed: usize,
}

/// First match of the preferred-name pattern: group 1 is the label
/// kind, group 2 the label.
pub struct NameExtractor {
    pattern: Regex,
}

impl NameExtractor {
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        Ok(Self {
            pattern: pattern::compile(pattern, 2)?,
        })
    }

    pub fn extract(&self, record: &Record) -> Option<PreferredName> {
        let caps = self.pattern.captures(&record.content)?;
        let kind = caps.get(1)?.as_str();
        let label = caps.get(2)?.as_str();
        Some(PreferredName {
            id: record.id.clone(),
            label: sanitize(label),
            kind: sanitize(kind),
        })
    }
}

// Labels end up in a TSV cell.
fn sanitize(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

/// Write `id\tlabel\tkind` for every record with a preferred name.
pub fn extract_names<W, E>(
    store: &RecordStore,
    batch_size: usize,
    extractor: &NameExtractor,
    writer: &mut TsvWriter<W>,
) -> Result<NameStats, E>
where
    W: Write,
    E: From<StorageError> + From<GraphError>,
{
    let mut stats = NameStats::default();
    store.for_each_batch(batch_size, |batch| {
        for record in batch {
            stats.records += 1;
            match extractor.extract(record) {
                Some(name) => {
                    writer
                        .write_row(&[&name.id, &name.label, &name.kind])
                        .map_err(GraphError::from)?;
                    stats.named += 1;
                }
                None => stats.unnamed += 1,
            }
        }
        Ok::<_, E>(())
    })?;

    tracing::info!(
        records = stats.records,
        named = stats.named,
        unnamed = stats.unnamed,
        "preferred names extracted"
    );
    Ok(stats)
}

/// Load `id\tlabel\tkind` rows keyed by id. The first row per id wins.
pub fn read_names<R: BufRead>(reader: R) -> Result<FxHashMap<String, PreferredName>, GraphError> {
    let mut names: FxHashMap<String, PreferredName> = FxHashMap::default();
    tsv::for_each_row(reader, |line, fields| -> Result<(), GraphError> {
        let [id, label, kind] = fields else {
            return Err(GraphError::MalformedLine {
                context: "preferred names",
                line,
                expected: 3,
            });
        };
        names
            .entry(id.to_string())
            .or_insert_with(|| PreferredName {
                id: id.to_string(),
                label: label.to_string(),
                kind: kind.to_string(),
            });
        Ok(())
    })?;
    Ok(names)
}
