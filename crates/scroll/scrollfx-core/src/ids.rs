//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Opaque handle to a host DOM node. The host decides the numbering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TickerId(pub u32);

/// Monotonic allocator for region, trigger, timeline and ticker ids.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_region: u32,
    next_trigger: u32,
    next_timeline: u32,
    next_ticker: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_region(&mut self) -> RegionId {
        let id = RegionId(self.next_region);
        self.next_region = self.next_region.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_trigger(&mut self) -> TriggerId {
        let id = TriggerId(self.next_trigger);
        self.next_trigger = self.next_trigger.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_timeline(&mut self) -> TimelineId {
        let id = TimelineId(self.next_timeline);
        self.next_timeline = self.next_timeline.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_ticker(&mut self) -> TickerId {
        let id = TickerId(self.next_ticker);
        self.next_ticker = self.next_ticker.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_region(), RegionId(0));
        assert_eq!(alloc.alloc_region(), RegionId(1));
        assert_eq!(alloc.alloc_trigger(), TriggerId(0));
        assert_eq!(alloc.alloc_timeline(), TimelineId(0));
        assert_eq!(alloc.alloc_timeline(), TimelineId(1));
        assert_eq!(alloc.alloc_ticker(), TickerId(0));
    }
}
