// Snapshot log for debug markers

use std::collections::VecDeque;

/// Tape state captured when a debug marker executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub address: usize,
    pub value: u8,
    pub character: char,
}

impl SnapshotRecord {
    pub fn new(address: usize, value: u8) -> Self {
        SnapshotRecord {
            address,
            value,
            character: char::from(value),
        }
    }
}

/// Bounded history of snapshots; the oldest record is evicted first
#[derive(Debug, Clone)]
pub struct SnapshotLog {
    records: VecDeque<SnapshotRecord>,
    capacity: usize,
    evicted: usize,
}

impl SnapshotLog {
    pub fn new(capacity: usize) -> Self {
        SnapshotLog {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            evicted: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, record: SnapshotRecord) {
        if self.records.len() >= self.capacity {
            self.records.pop_front();
            self.evicted += 1;
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records dropped to stay within capacity
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn into_vec(self) -> Vec<SnapshotRecord> {
        self.records.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_derived_from_value() {
        let record = SnapshotRecord::new(3, b'A');
        assert_eq!(record.character, 'A');
    }

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let mut log = SnapshotLog::new(512);
        for i in 0..=512 {
            log.push(SnapshotRecord::new(i, (i % 256) as u8));
        }
        assert_eq!(log.len(), 512);
        assert_eq!(log.evicted(), 1);
        let records = log.into_vec();
        assert_eq!(records.first().map(|r| r.address), Some(1));
        assert_eq!(records.last().map(|r| r.address), Some(512));
    }
}
