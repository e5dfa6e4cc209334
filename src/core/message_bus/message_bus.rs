//=========================================================================
// Message Bus
//=========================================================================
//
// Type-safe multi-consumer message queue for intra-tick communication.
//
// Architecture:
//   Producers → push<M>() → HashMap<TypeId, Vec<M>>
//                              ↓
//   Consumers ← read<M>() (shared) / take<M>() (exclusive)
//                              ↓
//   Controller ────────→ clear_all() at tick boundary
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::error;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can be sent through the MessageBus.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// Per-type message queues, cleared by the session controller once per
/// tick.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        MessageBus {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Pushes a message into the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        match queue.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(vec) => vec.push(msg),
            None => error!("MessageBus queue type mismatch for {}", std::any::type_name::<M>()),
        }
    }

    /// Returns all messages of type M currently queued.
    ///
    /// Any number of consumers may read the same messages in a tick.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Removes and returns all messages of type M.
    ///
    /// For single-consumer types (cues) that must be acted on exactly once.
    pub fn take<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map(Vec::len).unwrap_or(0)
    }

    /// Clears all messages of type M, preserving allocated capacity.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, keeping entries and capacity for the next tick.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
