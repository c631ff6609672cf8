use crate::protocol::Pair;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Identity of a slot, stable across edits and across removal of other slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(Uuid);

impl SlotId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSlot {
    pub id: SlotId,
    pub key: String,
    pub value: String,
}

impl PairSlot {
    pub fn to_pair(&self) -> Pair {
        Pair::new(self.key.clone(), self.value.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("no slot at index {index} (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered key/value slots. Removal keeps the order of the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairList {
    slots: Vec<PairSlot>,
}

impl PairList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding one blank slot, like a fresh form.
    pub fn with_blank() -> Self {
        let mut list = Self::new();
        list.append("", "");
        list
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> SlotId {
        let id = SlotId::generate();
        self.slots.push(PairSlot { id, key: key.into(), value: value.into() });
        id
    }

    pub fn remove(&mut self, index: usize) -> Option<PairSlot> {
        if index < self.slots.len() {
            Some(self.slots.remove(index))
        } else {
            None
        }
    }

    pub fn set_key(&mut self, index: usize, text: impl Into<String>) -> Result<(), SlotError> {
        self.slot_mut(index)?.key = text.into();
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, text: impl Into<String>) -> Result<(), SlotError> {
        self.slot_mut(index)?.value = text.into();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&PairSlot> {
        self.slots.get(index)
    }

    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PairSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Snapshot of the slot contents in order, incomplete slots included.
    pub fn to_pairs(&self) -> Vec<Pair> {
        self.slots.iter().map(PairSlot::to_pair).collect()
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut PairSlot, SlotError> {
        let len = self.slots.len();
        self.slots.get_mut(index).ok_or(SlotError::OutOfRange { index, len })
    }
}
