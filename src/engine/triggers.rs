// ABOUTME: User action triggers with timestamps and the rule that picks the winning action
// ABOUTME: Most recent stamp wins, exact ties fall back to a fixed priority
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Trigger resolution
//!
//! Every button carries a monotonically increasing timestamp of its last
//! press; `0` means "never pressed". When several stamps arrive together the
//! action with the largest stamp wins. Exact ties resolve by a fixed
//! priority:
//!
//! | Group | Priority |
//! |-------|----------|
//! | pager | `Search` > `Skip` > `Clear` |
//! | cart  | `Save` > `Empty` |

use serde::{Deserialize, Serialize};

/// Recipe pager action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagerAction {
    /// Query a new batch for the current selection
    Search,
    /// Show the next recipe of the cached batch
    Skip,
    /// Hide the recipe, drop the batch and the selection
    Clear,
}

/// Cart action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    /// Price and append the current recipe's missing ingredients
    Save,
    /// Drop every cart entry
    Empty,
}

/// Last-press timestamps of the pager buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerTriggers {
    /// Search button stamp
    pub search: u64,
    /// Skip button stamp
    pub skip: u64,
    /// Clear button stamp
    pub clear: u64,
}

impl PagerTriggers {
    /// Winning action and its stamp; `None` when no button was ever pressed
    #[must_use]
    pub fn resolve(&self) -> Option<(PagerAction, u64)> {
        // max_by_key returns the last maximum, so the highest priority goes last
        [
            (PagerAction::Clear, self.clear),
            (PagerAction::Skip, self.skip),
            (PagerAction::Search, self.search),
        ]
        .into_iter()
        .max_by_key(|(_, stamp)| *stamp)
        .filter(|(_, stamp)| *stamp > 0)
    }
}

/// Last-press timestamps of the cart buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartTriggers {
    /// Save button stamp
    pub save: u64,
    /// Empty button stamp
    pub empty: u64,
}

impl CartTriggers {
    /// Winning action and its stamp; `None` when no button was ever pressed
    #[must_use]
    pub fn resolve(&self) -> Option<(CartAction, u64)> {
        if self.save == 0 && self.empty == 0 {
            None
        } else if self.save >= self.empty {
            Some((CartAction::Save, self.save))
        } else {
            Some((CartAction::Empty, self.empty))
        }
    }
}

/// Remembers the newest stamp handled so replayed trigger sets are ignored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerClock {
    last: u64,
}

impl TriggerClock {
    /// Accept `stamp` if it is newer than every stamp accepted so far
    pub fn accept(&mut self, stamp: u64) -> bool {
        if stamp > self.last {
            self.last = stamp;
            true
        } else {
            false
        }
    }

    /// Newest accepted stamp
    #[must_use]
    pub const fn last(&self) -> u64 {
        self.last
    }
}
