//! Bounded pool of panel slots and the layout sizing policy.
//!
//! Slots are created up front and recycled: adding a panel shows the first
//! hidden slot in canonical order, removing one hides it again. Hiding never
//! touches the slot's configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stable identity of a panel slot (zero-based). Displayed as `Plot1`, `Plot2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub usize);

impl PanelId {
    pub fn slot(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plot{}", self.0 + 1)
    }
}

impl FromStr for PanelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("Plot")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .map(|n| PanelId(n - 1))
            .ok_or_else(|| format!("invalid panel name `{s}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Hidden,
    Visible,
}

#[derive(Debug, Clone)]
pub struct PanelRegistry {
    slots: Vec<SlotState>,
}

impl PanelRegistry {
    /// `capacity` slots with only the first one visible. At least one slot exists.
    pub fn new(capacity: usize) -> Self {
        let mut slots = vec![SlotState::Hidden; capacity.max(1)];
        slots[0] = SlotState::Visible;
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn all_ids(&self) -> impl Iterator<Item = PanelId> {
        (0..self.slots.len()).map(PanelId)
    }

    /// Show the first hidden slot. Returns `None` when every slot is already visible.
    pub fn add_panel(&mut self) -> Option<PanelId> {
        let slot = self.slots.iter().position(|s| *s == SlotState::Hidden)?;
        self.slots[slot] = SlotState::Visible;
        debug!(panel = %PanelId(slot), "panel shown");
        Some(PanelId(slot))
    }

    /// Hide a slot regardless of its current state. Unknown ids are ignored.
    pub fn remove_panel(&mut self, id: PanelId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = SlotState::Hidden;
            debug!(panel = %id, "panel hidden");
        }
    }

    pub fn is_visible(&self, id: PanelId) -> bool {
        self.slots.get(id.0) == Some(&SlotState::Visible)
    }

    /// Visible panels in canonical slot order.
    pub fn visible(&self) -> Vec<PanelId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == SlotState::Visible)
            .map(|(i, _)| PanelId(i))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| **s == SlotState::Visible).count()
    }

    pub fn sizing_class(&self) -> SizingClass {
        SizingClass::for_count(self.visible_count())
    }
}

/// Width class for each visible panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingClass {
    Half,
    Third,
    Full,
}

impl SizingClass {
    /// Even counts go two per row, exactly three go three per row, anything
    /// else takes the full width.
    pub fn for_count(count: usize) -> Self {
        if count % 2 == 0 {
            SizingClass::Half
        } else if count == 3 {
            SizingClass::Third
        } else {
            SizingClass::Full
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            SizingClass::Half => 2,
            SizingClass::Third => 3,
            SizingClass::Full => 1,
        }
    }
}
