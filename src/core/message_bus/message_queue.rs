//=========================================================================
// Message Queue Trait
//=========================================================================
//
// Type-erased view of a `Vec<M>` so the bus can keep queues of different
// message types in one map and clear them without knowing `M`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::message_bus::Message;

//=========================================================================

pub(super) trait MessageQueue: Send {
    /// Clears all messages while preserving allocated capacity.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_queue_keeps_capacity() {
        let mut queue: Vec<u32> = (0..64).collect();
        let capacity = queue.capacity();

        let erased: &mut dyn MessageQueue = &mut queue;
        erased.clear_queue();
        assert_eq!(erased.len(), 0);

        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn downcast_round_trip() {
        let mut queue: Vec<&'static str> = vec!["lost"];
        let erased: &mut dyn MessageQueue = &mut queue;

        erased
            .as_any_mut()
            .downcast_mut::<Vec<&'static str>>()
            .unwrap()
            .push("deleted");

        assert!(erased.as_any().downcast_ref::<Vec<u32>>().is_none());
        assert_eq!(queue, vec!["lost", "deleted"]);
    }
}
