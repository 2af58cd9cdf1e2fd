//! Per-tick input intents.
//!
//! The host polls its input device once per tick and hands the result over as
//! plain data. Both signals are edge-triggered: `true` means "pressed this
//! tick", not "currently held".

/// The two discrete signals the simulation consumes each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump was pressed this tick. Only takes effect while grounded.
    pub jump: bool,
    /// Channel switch was pressed this tick. Always takes effect.
    pub switch: bool,
}

impl TickInput {
    /// No input this tick.
    pub const fn idle() -> Self {
        Self {
            jump: false,
            switch: false,
        }
    }

    pub const fn jump() -> Self {
        Self {
            jump: true,
            switch: false,
        }
    }

    pub const fn switch() -> Self {
        Self {
            jump: false,
            switch: true,
        }
    }
}
