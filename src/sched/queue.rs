//! Bounded command FIFO
//!
//! Fixed-capacity ring buffer. A push onto a full queue is refused and
//! counted rather than overwriting pending work; losing a newly planned
//! command is recoverable, losing one already queued is not.

use tracing::warn;

use crate::commands::Command;

pub struct CommandQueue {
    slots: Vec<Option<Command>>,
    head: usize,
    count: usize,
    /// Pushes refused because the queue was full
    pub dropped: u64,
}

impl CommandQueue {
    pub fn with_capacity(capacity: usize) -> CommandQueue {
        assert!(capacity > 0, "queue capacity must be nonzero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        CommandQueue {
            slots,
            head: 0,
            count: 0,
            dropped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Enqueue at the tail; returns false and counts the drop when full
    pub fn push(&mut self, command: Command) -> bool {
        if self.count == self.slots.len() {
            warn!(command = command.label(), "command queue full, dropping");
            self.dropped += 1;
            return false;
        }
        let tail = (self.head + self.count) % self.slots.len();
        self.slots[tail] = Some(command);
        self.count += 1;
        true
    }

    /// Dequeue from the head
    pub fn pop(&mut self) -> Option<Command> {
        if self.count == 0 {
            return None;
        }
        let command = self.slots[self.head].take();
        debug_assert!(command.is_some(), "occupied slot was empty");
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        command
    }

    /// Discard everything pending
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delay(ms: u64) -> Command {
        Command::delay(ms)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::with_capacity(4);
        for ms in [1, 2, 3] {
            assert!(queue.push(delay(ms)));
        }
        for ms in [1, 2, 3] {
            match queue.pop() {
                Some(Command::Delay(command)) => assert_eq!(command.duration_ms(), ms),
                other => panic!("expected delay command, got {:?}", other.map(|c| c.label())),
            }
        }
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_full_queue_refuses_push() {
        let mut queue = CommandQueue::with_capacity(4);
        for ms in [1, 2, 3, 4] {
            assert!(queue.push(delay(ms)));
        }
        assert!(!queue.push(delay(5)));
        assert_eq!(queue.dropped, 1);
        assert_eq!(queue.len(), 4);

        // The refused push must not have disturbed the queued commands
        match queue.pop() {
            Some(Command::Delay(command)) => assert_eq!(command.duration_ms(), 1),
            other => panic!("expected delay command, got {:?}", other.map(|c| c.label())),
        }
    }

    #[test]
    fn test_wraps_around() {
        let mut queue = CommandQueue::with_capacity(2);
        for round in 0..5u64 {
            assert!(queue.push(delay(round)));
            match queue.pop() {
                Some(Command::Delay(command)) => assert_eq!(command.duration_ms(), round),
                _ => panic!("expected delay command"),
            }
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_empties_and_rewinds() {
        let mut queue = CommandQueue::with_capacity(3);
        queue.push(delay(1));
        queue.push(delay(2));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.push(delay(3)));
        assert_eq!(queue.len(), 1);
    }
}
