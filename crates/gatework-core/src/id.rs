use slotmap::new_key_type;

new_key_type! {
    /// Identifies a placed component (emitter, gate, or receiver).
    pub struct ComponentId;

    /// Identifies a wire. Stable across removals of other wires, so
    /// traversals can key visited sets on it.
    pub struct WireId;
}
