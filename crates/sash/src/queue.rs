//! Growable event queue
//!
//! A queue owns a contiguous buffer of canonical events. Capacity starts at
//! [`INITIAL_QUEUE_CAPACITY`] and only ever grows, by doubling; it never
//! shrinks for the life of the queue. Growth reserves the new buffer before
//! touching the old one, so a failed reservation leaves every queued event
//! intact and surfaces as [`SashError::OutOfMemory`].
//!
//! Delivery is strict first-in-first-out. Queues support fan-in — several
//! windows may target the same queue — under a single-consumer assumption;
//! draining one queue from multiple threads is a precondition violation.

use std::collections::VecDeque;

use slotmap::new_key_type;

use crate::error::{SashError, SashResult};
use crate::event::Event;

/// Initial number of event slots in a fresh queue
pub const INITIAL_QUEUE_CAPACITY: usize = 32;

new_key_type! {
    /// Stable identifier for an event queue owned by a [`Context`]
    ///
    /// [`Context`]: crate::context::Context
    pub struct QueueId;
}

/// Owned, growable sequence of canonical events
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<Event>,
    capacity: usize,
}

impl EventQueue {
    /// Create an empty queue with the initial capacity reserved.
    pub(crate) fn new() -> SashResult<Self> {
        let mut events = VecDeque::new();
        events.try_reserve_exact(INITIAL_QUEUE_CAPACITY)?;
        Ok(Self {
            events,
            capacity: INITIAL_QUEUE_CAPACITY,
        })
    }

    /// Append an event, doubling capacity first when the queue is full.
    ///
    /// On reservation failure the existing contents are untouched and the
    /// event is not enqueued.
    pub(crate) fn push(&mut self, event: Event) -> SashResult<()> {
        if self.events.len() == self.capacity {
            let grown = self.capacity * 2;
            self.events
                .try_reserve_exact(grown - self.events.len())
                .map_err(SashError::OutOfMemory)?;
            self.capacity = grown;
        }
        self.events.push_back(event);
        Ok(())
    }

    /// Remove and return the oldest queued event.
    pub(crate) fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events are queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Current slot capacity. Always a power-of-two multiple of
    /// [`INITIAL_QUEUE_CAPACITY`]; never decreases.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{WindowEvent, WindowEventKind};
    use crate::window::WindowId;

    fn close_event() -> Event {
        Event::Window(WindowEvent {
            window: WindowId::default(),
            kind: WindowEventKind::CloseRequested,
        })
    }

    fn resize_event(width: i32, height: i32) -> Event {
        Event::Window(WindowEvent {
            window: WindowId::default(),
            kind: WindowEventKind::Resized { width, height },
        })
    }

    #[test]
    fn test_new_queue_is_empty_at_initial_capacity() {
        let queue = EventQueue::new().unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), INITIAL_QUEUE_CAPACITY);
    }

    #[test]
    fn test_push_tracks_count() {
        let mut queue = EventQueue::new().unwrap();
        for _ in 0..10 {
            queue.push(close_event()).unwrap();
        }
        assert_eq!(queue.len(), 10);
        assert_eq!(queue.capacity(), INITIAL_QUEUE_CAPACITY);
    }

    #[test]
    fn test_capacity_doubles_on_overflow() {
        let mut queue = EventQueue::new().unwrap();
        for _ in 0..(INITIAL_QUEUE_CAPACITY + 1) {
            queue.push(close_event()).unwrap();
        }
        assert_eq!(queue.len(), INITIAL_QUEUE_CAPACITY + 1);
        assert_eq!(queue.capacity(), INITIAL_QUEUE_CAPACITY * 2);
    }

    #[test]
    fn test_capacity_is_smallest_sufficient_doubling() {
        let mut queue = EventQueue::new().unwrap();
        for _ in 0..100 {
            queue.push(close_event()).unwrap();
        }
        // 100 events need 32 * 2 * 2 = 128 slots.
        assert_eq!(queue.capacity(), 128);
    }

    #[test]
    fn test_capacity_never_shrinks() {
        let mut queue = EventQueue::new().unwrap();
        for _ in 0..64 {
            queue.push(close_event()).unwrap();
        }
        let grown = queue.capacity();
        while queue.pop().is_some() {}
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), grown);
    }

    #[test]
    fn test_pop_returns_events_in_arrival_order() {
        let mut queue = EventQueue::new().unwrap();
        queue.push(resize_event(1, 1)).unwrap();
        queue.push(resize_event(2, 2)).unwrap();
        queue.push(resize_event(3, 3)).unwrap();

        assert_eq!(queue.pop(), Some(resize_event(1, 1)));
        assert_eq!(queue.pop(), Some(resize_event(2, 2)));
        assert_eq!(queue.pop(), Some(resize_event(3, 3)));
        assert_eq!(queue.pop(), None);
    }
}
