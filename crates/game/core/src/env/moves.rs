//! Move catalog oracle.

use std::collections::BTreeMap;

use crate::moves::{MoveDefinition, MoveId};

use super::OracleError;

/// Oracle providing move definitions by id.
pub trait MoveOracle: Send + Sync {
    /// Returns the definition for `id`, if the catalog has one.
    fn move_by_id(&self, id: &MoveId) -> Option<&MoveDefinition>;

    /// All definitions in catalog order.
    fn all_moves(&self) -> Vec<&MoveDefinition>;

    /// Resolves a moveset, skipping ids the catalog does not know.
    ///
    /// Order follows `ids`.
    fn moves_by_ids(&self, ids: &[MoveId]) -> Vec<&MoveDefinition> {
        ids.iter().filter_map(|id| self.move_by_id(id)).collect()
    }

    /// Resolves a moveset in catalog order rather than in the order of `ids`.
    fn moves_in_catalog_order(&self, ids: &[MoveId]) -> Vec<&MoveDefinition> {
        self.all_moves()
            .into_iter()
            .filter(|definition| ids.contains(&definition.id))
            .collect()
    }

    /// Resolves a single id or reports it missing.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::MoveNotFound`] for unknown ids.
    fn require(&self, id: &MoveId) -> Result<&MoveDefinition, OracleError> {
        self.move_by_id(id)
            .ok_or_else(|| OracleError::MoveNotFound(id.clone()))
    }
}

/// In-memory move catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovesSnapshot {
    moves: Vec<MoveDefinition>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: BTreeMap<MoveId, usize>,
}

impl MovesSnapshot {
    /// Builds a catalog from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::DuplicateMove`] if two definitions share an id.
    pub fn new(moves: Vec<MoveDefinition>) -> Result<Self, OracleError> {
        let mut index = BTreeMap::new();
        for (position, definition) in moves.iter().enumerate() {
            if index.insert(definition.id.clone(), position).is_some() {
                return Err(OracleError::DuplicateMove(definition.id.clone()));
            }
        }
        Ok(Self { moves, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn into_inner(self) -> Vec<MoveDefinition> {
        self.moves
    }

    fn lookup(&self, id: &MoveId) -> Option<&MoveDefinition> {
        match self.index.get(id) {
            Some(&position) => self.moves.get(position),
            // index is skipped by serde; fall back to a scan after deserialization
            None if self.index.len() != self.moves.len() => {
                self.moves.iter().find(|definition| &definition.id == id)
            }
            None => None,
        }
    }
}

impl MoveOracle for MovesSnapshot {
    fn move_by_id(&self, id: &MoveId) -> Option<&MoveDefinition> {
        self.lookup(id)
    }

    fn all_moves(&self) -> Vec<&MoveDefinition> {
        self.moves.iter().collect()
    }
}
