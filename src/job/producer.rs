//! Producer contract: the callback interface supplying successive records.

/// One record returned by a [`RecordProducer`].
///
/// The engine appends `data` to the file (skipping the append entirely when
/// it is empty) and stops calling the producer once `is_last` is true. A
/// zero-length final record means "no more data, nothing in this call".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Bytes to append to the file. May be empty.
    pub data: Vec<u8>,
    /// True exactly once, on the final record of the job.
    pub is_last: bool,
}

impl Record {
    /// A record with more data to follow.
    pub fn more(data: Vec<u8>) -> Self {
        Self {
            data,
            is_last: false,
        }
    }

    /// The final record of the job.
    pub fn last(data: Vec<u8>) -> Self {
        Self {
            data,
            is_last: true,
        }
    }

    /// A zero-length final record: no more data, nothing in this call.
    pub fn end() -> Self {
        Self::last(Vec::new())
    }
}

/// Supplies the write engine with successive data records.
///
/// The engine calls [`next_record`](RecordProducer::next_record) with
/// `record_index` starting at 0 and incrementing by exactly one per call,
/// until a record with `is_last == true` is returned. There is no failure
/// channel by design: a producer that runs out of data early returns
/// [`Record::end`]; any richer error reporting happens through the
/// requester's own state behind `&self`.
///
/// Implementations must be `Send + Sync` since calls happen on the
/// background worker thread.
pub trait RecordProducer: Send + Sync + 'static {
    /// Returns the record at the given index.
    fn next_record(&self, record_index: u32) -> Record;
}

/// Producer over a fixed list of record buffers.
///
/// Useful for requesters whose data is fully materialized at submission
/// time, and as a building block in tests. An empty list yields a single
/// zero-length final record.
#[derive(Debug, Clone, Default)]
pub struct SliceProducer {
    records: Vec<Vec<u8>>,
}

impl SliceProducer {
    /// Creates a producer that yields the given buffers in order.
    pub fn new(records: Vec<Vec<u8>>) -> Self {
        Self { records }
    }
}

impl RecordProducer for SliceProducer {
    fn next_record(&self, record_index: u32) -> Record {
        let index = record_index as usize;
        match self.records.get(index) {
            Some(data) => {
                if index + 1 == self.records.len() {
                    Record::last(data.clone())
                } else {
                    Record::more(data.clone())
                }
            }
            None => Record::end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_constructors() {
        assert!(!Record::more(vec![1]).is_last);
        assert!(Record::last(vec![1]).is_last);

        let end = Record::end();
        assert!(end.is_last);
        assert!(end.data.is_empty());
    }

    #[test]
    fn test_slice_producer_marks_final_record() {
        let producer = SliceProducer::new(vec![vec![1, 2], vec![3]]);

        let first = producer.next_record(0);
        assert_eq!(first.data, vec![1, 2]);
        assert!(!first.is_last);

        let second = producer.next_record(1);
        assert_eq!(second.data, vec![3]);
        assert!(second.is_last);
    }

    #[test]
    fn test_slice_producer_single_record() {
        let producer = SliceProducer::new(vec![vec![9]]);
        let only = producer.next_record(0);
        assert_eq!(only.data, vec![9]);
        assert!(only.is_last);
    }

    #[test]
    fn test_empty_slice_producer_ends_immediately() {
        let producer = SliceProducer::new(vec![]);
        let record = producer.next_record(0);
        assert!(record.is_last);
        assert!(record.data.is_empty());
    }
}
