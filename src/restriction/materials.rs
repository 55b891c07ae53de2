//! Material-search cache: chunk id to selected-material-names lookup.
//!
//! Built at most once per traverser by a single walk of the lattice, then
//! consulted by every `materials(chunk)` query. A slot array indexed by
//! chunk id points into parallel storage for the name lists and the
//! "selection actually needed" flags; a `None` slot means the walk never
//! recorded materials for that chunk (not visited, or genuinely
//! materialless).

use crate::sil_error::SilError;

/// Chunk-indexed cache of selected material names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct MaterialCache {
    /// Slot per chunk id; `None` marks a chunk with no recorded materials.
    list_for_chunk: Vec<Option<usize>>,
    /// Parallel storage: material-name lists.
    lists: Vec<Vec<String>>,
    /// Parallel storage: whether a genuine partial selection is in effect
    /// (false when all or none of the chunk's materials are used).
    needs_selection: Vec<bool>,
}

impl MaterialCache {
    /// True when the walk recorded no materials for any chunk.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Record the material list for `chunk`, growing the slot array with
    /// `None` padding until it covers `chunk`.
    ///
    /// A second record for the same chunk replaces the first.
    pub fn add_material_list(&mut self, chunk: u32, names: Vec<String>, needs_selection: bool) {
        let chunk = chunk as usize;
        if self.list_for_chunk.len() <= chunk {
            self.list_for_chunk.resize(chunk + 1, None);
        }
        self.lists.push(names);
        self.needs_selection.push(needs_selection);
        self.list_for_chunk[chunk] = Some(self.lists.len() - 1);
    }

    /// Borrow the recorded list and flag for `chunk`.
    ///
    /// # Errors
    /// - `ChunkOutOfRange` if `chunk` lies beyond the slot array,
    /// - `UnknownChunk` (improper use, logged at `warn!`) if the slot was
    ///   allocated but never populated.
    pub fn lookup(&self, chunk: u32) -> Result<(&[String], bool), SilError> {
        let slot = self
            .list_for_chunk
            .get(chunk as usize)
            .ok_or(SilError::ChunkOutOfRange {
                chunk,
                bound: self.list_for_chunk.len(),
            })?;
        let Some(entry) = slot else {
            log::warn!("material list requested for chunk {chunk}, which the restriction never visited");
            return Err(SilError::UnknownChunk { chunk });
        };
        Ok((&self.lists[*entry], self.needs_selection[*entry]))
    }
}
