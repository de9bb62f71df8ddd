//! Fixed-capacity, ordered log of issued instructions.
//!
//! A plain array with an explicit length counter and a `full` flag — no
//! dynamic allocation, matching the bounded-memory discipline of the target
//! hardware. Overflow appends are shift-and-insert, so the oldest entry
//! always lives at index 0 and there is no rotating head pointer.

use log::debug;

use crate::error::CommandError;
use crate::instruction::{Instruction, Opcode};

/// Capacity of the instruction log.
pub const MAX_INSTRUCTIONS: usize = 5;

const EMPTY: Instruction = Instruction::new(Opcode::Stop, 0);

/// Bounded ordered collection of [`Instruction`]s, oldest first.
///
/// While not full, entries `[0, count)` are valid. Once `count` appends have
/// filled the log, `full` is set and stays set until a delete brings the log
/// back under capacity; while full, every append evicts the oldest entry.
pub struct InstructionLog {
    entries: [Instruction; MAX_INSTRUCTIONS],
    count: usize,
    full: bool,
}

impl Default for InstructionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionLog {
    pub fn new() -> Self {
        Self {
            entries: [EMPTY; MAX_INSTRUCTIONS],
            count: 0,
            full: false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Record an instruction at the logical end. On a full log the entries
    /// shift one slot toward index 0 and the oldest is discarded (FIFO).
    pub fn append(&mut self, instruction: Instruction) {
        if self.full {
            self.entries.copy_within(1.., 0);
            self.entries[MAX_INSTRUCTIONS - 1] = instruction;
            debug!("log append (evicting oldest): {}", instruction);
        } else {
            self.entries[self.count] = instruction;
            self.count += 1;
            self.full = self.count == MAX_INSTRUCTIONS;
            debug!("log append at {}: {}", self.count, instruction);
        }
    }

    /// Insert at a 1-based position, shifting later entries toward the tail.
    /// On a full log the entry at the last index is dropped. On a non-full
    /// log a position beyond the logical end is a bounded no-op, guarding
    /// against inserting past valid content.
    pub fn insert_at(&mut self, position: i32, instruction: Instruction) -> Result<(), CommandError> {
        let index = self.index_for(position)?;
        if self.full {
            self.entries.copy_within(index..MAX_INSTRUCTIONS - 1, index + 1);
            self.entries[index] = instruction;
        } else {
            if index >= self.count {
                return Ok(());
            }
            self.entries.copy_within(index..self.count, index + 1);
            self.entries[index] = instruction;
            self.count += 1;
            self.full = self.count == MAX_INSTRUCTIONS;
        }
        debug!("log insert at {}: {}", position, instruction);
        Ok(())
    }

    /// Delete the entry at a 1-based position, shifting later entries toward
    /// index 0. Deleting from a full log clears the `full` flag. A position
    /// beyond the logical end of a non-full log is a bounded no-op.
    pub fn delete_at(&mut self, position: i32) -> Result<(), CommandError> {
        let index = self.index_for(position)?;
        if self.full {
            self.entries.copy_within(index + 1.., index);
            self.full = false;
            self.count = MAX_INSTRUCTIONS - 1;
        } else {
            if index >= self.count {
                return Ok(());
            }
            self.entries.copy_within(index + 1..self.count, index);
            self.count -= 1;
        }
        debug!("log delete at {}", position);
        Ok(())
    }

    /// The valid entries in stored order, oldest first.
    pub fn entries(&self) -> &[Instruction] {
        &self.entries[..self.count]
    }

    // Positions are validated before any index arithmetic; 0 and negative
    // values must never reach a shift loop.
    fn index_for(&self, position: i32) -> Result<usize, CommandError> {
        if !(1..=MAX_INSTRUCTIONS as i32).contains(&position) {
            return Err(CommandError::LogIndexOutOfRange { position });
        }
        Ok((position - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(cm: i32) -> Instruction {
        Instruction::new(Opcode::Forward, cm)
    }

    fn filled(n: usize) -> InstructionLog {
        let mut log = InstructionLog::new();
        for i in 0..n {
            log.append(forward(i as i32 + 1));
        }
        log
    }

    #[test]
    fn test_appends_preserve_order() {
        for n in 0..=MAX_INSTRUCTIONS {
            let log = filled(n);
            let expected: Vec<_> = (1..=n as i32).map(forward).collect();
            assert_eq!(log.entries(), expected.as_slice());
            assert_eq!(log.is_full(), n == MAX_INSTRUCTIONS);
        }
    }

    #[test]
    fn test_sixth_append_evicts_oldest() {
        let mut log = filled(MAX_INSTRUCTIONS);
        log.append(forward(6));
        assert!(log.is_full());
        assert_eq!(log.entries(), &[forward(2), forward(3), forward(4), forward(5), forward(6)]);
    }

    #[test]
    fn test_insert_interior() {
        let mut log = filled(3);
        log.insert_at(2, forward(99)).unwrap();
        assert_eq!(log.entries(), &[forward(1), forward(99), forward(2), forward(3)]);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_insert_fills_log() {
        let mut log = filled(4);
        log.insert_at(1, forward(99)).unwrap();
        assert!(log.is_full());
        assert_eq!(log.entries(), &[forward(99), forward(1), forward(2), forward(3), forward(4)]);
    }

    #[test]
    fn test_insert_on_full_log_evicts_tail() {
        let mut log = filled(MAX_INSTRUCTIONS);
        log.insert_at(1, forward(99)).unwrap();
        assert!(log.is_full());
        assert_eq!(log.entries(), &[forward(99), forward(1), forward(2), forward(3), forward(4)]);
    }

    #[test]
    fn test_insert_beyond_logical_end_is_noop() {
        let mut log = filled(2);
        log.insert_at(3, forward(99)).unwrap();
        assert_eq!(log.entries(), &[forward(1), forward(2)]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_delete_interior() {
        let mut log = filled(3);
        log.delete_at(2).unwrap();
        assert_eq!(log.entries(), &[forward(1), forward(3)]);
    }

    #[test]
    fn test_delete_front_of_full_log_clears_full() {
        let mut log = filled(MAX_INSTRUCTIONS);
        log.delete_at(1).unwrap();
        assert!(!log.is_full());
        assert_eq!(log.entries(), &[forward(2), forward(3), forward(4), forward(5)]);
    }

    #[test]
    fn test_delete_beyond_logical_end_is_noop() {
        let mut log = filled(2);
        log.delete_at(3).unwrap();
        assert_eq!(log.entries(), &[forward(1), forward(2)]);
    }

    #[test]
    fn test_positions_outside_range_are_rejected() {
        for position in [0, -1, MAX_INSTRUCTIONS as i32 + 1] {
            let mut log = filled(3);
            assert_eq!(
                log.insert_at(position, forward(99)),
                Err(CommandError::LogIndexOutOfRange { position })
            );
            assert_eq!(
                log.delete_at(position),
                Err(CommandError::LogIndexOutOfRange { position })
            );
            assert_eq!(log.entries(), &[forward(1), forward(2), forward(3)]);
        }
    }

    #[test]
    fn test_refill_after_delete() {
        let mut log = filled(MAX_INSTRUCTIONS);
        log.delete_at(1).unwrap();
        log.append(forward(6));
        assert!(log.is_full());
        assert_eq!(log.entries(), &[forward(2), forward(3), forward(4), forward(5), forward(6)]);
    }
}
