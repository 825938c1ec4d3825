use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to an atom stored inside a [`Molecule`](super::molecule::Molecule).
    pub struct AtomId;
}
