//! ID Compactor: bijection between string ids and dense `u32`s.

use std::io::{BufRead, Write};

use authgraph_core::errors::GraphError;
use authgraph_core::types::FxHashMap;

use crate::tsv::{self, TsvWriter};

/// Sequential integer standing in for a string id.
pub type DenseId = u32;

/// Forward and backward lookup over the same id set.
#[derive(Debug, Default, Clone)]
pub struct IdMap {
    forward: FxHashMap<String, DenseId>,
    backward: Vec<String>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next dense id to `id`, or return the one it already has.
    pub fn insert(&mut self, id: &str) -> Result<DenseId, GraphError> {
        if let Some(&dense) = self.forward.get(id) {
            return Ok(dense);
        }
        let dense = DenseId::try_from(self.backward.len()).map_err(|_| {
            GraphError::IdSpaceExhausted {
                count: self.backward.len(),
            }
        })?;
        self.forward.insert(id.to_string(), dense);
        self.backward.push(id.to_string());
        Ok(dense)
    }

    /// Number ids in first-seen order starting at 0. Repeats are ignored.
    pub fn from_ids<I, S>(ids: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for id in ids {
            map.insert(id.as_ref())?;
        }
        Ok(map)
    }

    pub fn dense(&self, id: &str) -> Option<DenseId> {
        self.forward.get(id).copied()
    }

    pub fn original(&self, dense: DenseId) -> Option<&str> {
        self.backward.get(dense as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }

    /// `(id, dense)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DenseId)> {
        self.backward
            .iter()
            .enumerate()
            .map(|(dense, id)| (id.as_str(), dense as DenseId))
    }

    /// Persist as `id\tdense` rows in dense order.
    pub fn write_tsv<W: Write>(&self, writer: &mut TsvWriter<W>) -> std::io::Result<()> {
        for (id, dense) in self.iter() {
            writer.write_row(&[id, dense.to_string().as_str()])?;
        }
        Ok(())
    }

    /// Load a map written by [`IdMap::write_tsv`]. Rows must carry dense
    /// ids `0, 1, 2, ...` in order and every id exactly once.
    pub fn read_tsv<R: BufRead>(reader: R) -> Result<Self, GraphError> {
        let mut map = Self::new();
        tsv::for_each_row(reader, |line, fields| -> Result<(), GraphError> {
            let (id, dense) = tsv::pair("id map", line, fields)?;
            let dense: DenseId = dense.parse().map_err(|_| GraphError::InvalidDenseId {
                line,
                value: dense.to_string(),
            })?;
            if dense as usize != map.len() {
                return Err(GraphError::InvalidDenseId {
                    line,
                    value: dense.to_string(),
                });
            }
            if map.forward.contains_key(id) {
                return Err(GraphError::DuplicateId { id: id.to_string() });
            }
            map.insert(id)?;
            Ok(())
        })?;
        Ok(map)
    }
}
