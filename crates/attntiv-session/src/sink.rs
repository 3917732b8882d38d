//! In-memory record sink.

use std::sync::Mutex;

use attntiv_core::results::ExerciseRecord;

use crate::traits::RecordSink;

/// Keeps every stored record in memory, in arrival order.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<ExerciseRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records stored so far.
    pub fn records(&self) -> Vec<ExerciseRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for MemorySink {
    fn store(&self, record: &ExerciseRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attntiv_core::{DifficultyTier, ExerciseKind};

    #[test]
    fn stores_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        let a = ExerciseRecord::new(ExerciseKind::Memory, DifficultyTier::Beginner, 100, 1, 1);
        let b = ExerciseRecord::new(ExerciseKind::Focus, DifficultyTier::Beginner, 0, 0, 3);
        sink.store(&a).unwrap();
        sink.store(&b).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records(), vec![a, b]);
    }
}
