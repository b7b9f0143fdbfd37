//! Query identifiers.
//!
//! Each thread owns its own counter, so lookups running on different workers
//! never contend for it. The counter starts at 1 and keeps growing past 16
//! bits; only the low 16 bits go on the wire.

use std::cell::Cell;

thread_local! {
    static THREAD_COUNTER: Cell<u32> = const { Cell::new(1) };
}

/// Next id from the calling thread's counter.
pub fn next_query_id() -> u16 {
    THREAD_COUNTER.with(|counter| {
        let value = counter.get();
        counter.set(value.wrapping_add(1));
        wire_id(value)
    })
}

fn wire_id(raw: u32) -> u16 {
    (raw & 0xFFFF) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_thread_starts_at_one_and_increments() {
        let ids = std::thread::spawn(|| (next_query_id(), next_query_id(), next_query_id()))
            .join()
            .unwrap();
        assert_eq!(ids, (1, 2, 3));
    }

    #[test]
    fn test_id_is_masked_to_16_bits() {
        assert_eq!(wire_id(0x1_0005), 5);
        assert_eq!(wire_id(0xFFFF), 0xFFFF);
        assert_eq!(wire_id(0x1_0000), 0);
    }

    #[test]
    fn test_counter_wraps_past_16_bits() {
        let ids = std::thread::spawn(|| {
            THREAD_COUNTER.with(|counter| counter.set(0xFFFF));
            (next_query_id(), next_query_id())
        })
        .join()
        .unwrap();
        assert_eq!(ids, (0xFFFF, 0));
    }

    #[test]
    fn test_thread_counters_are_independent() {
        let first = std::thread::spawn(|| (next_query_id(), next_query_id()))
            .join()
            .unwrap();
        let second = std::thread::spawn(|| (next_query_id(), next_query_id()))
            .join()
            .unwrap();
        assert_eq!(first, (1, 2));
        assert_eq!(second, (1, 2));
    }

    #[test]
    fn test_thread_counter_yields_distinct_ids() {
        let ids: HashSet<u16> = (0..100).map(|_| next_query_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
