bitflags! {
    /// Effect behaviours that look accidental but are kept available. Each
    /// one can be switched on or off without touching the others.
    pub struct Quirks: u32 {
        const NONE = 0;
        /// Swirl phase is `5t | (x ^ y)` instead of `5t + (x ^ y)`
        const SWIRL_BITWISE_PHASE = 1;
        /// Glitch band rules read channels already rewritten by the same rule
        const GLITCH_CHAINED_BANDS = 2;
        /// Rotation uses a skewed set of corners instead of turning the
        /// image about its center
        const SKEWED_CORNERS = 4;
    }
}

impl Default for Quirks {
    fn default() -> Quirks {
        Quirks::SWIRL_BITWISE_PHASE
    }
}
