//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a component stored in the game arena
    ///
    /// Handles are generational: once a component is removed, its handle never
    /// resolves again, even if the slot is reused.
    pub struct ComponentId;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<ComponentId, T>;
