//! View state machines
//!
//! Each view owns its own fetched data and re-fetches after mutations
//! instead of patching in place.
//!
//! - `listing`: public casting list
//! - `apply`: application form bound to one casting
//! - `admin`: casting management list and editor

pub mod admin;
pub mod apply;
pub mod listing;

pub use admin::{AdminView, CastingEditor};
pub use apply::ApplyForm;
pub use listing::{Badge, ListingView};

// =============================================================================
// Load State
// =============================================================================

/// Identifies one list load; newer tickets supersede older ones
pub type Ticket = u64;

/// Fetch state for a view's data
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Load state plus the ticket of the request it is waiting on
#[derive(Debug, Clone, Default)]
pub struct Loader<T> {
    pub state: LoadState<T>,
    latest: Ticket,
}

impl<T> Loader<T> {
    /// Start a new load and return its ticket
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.state = LoadState::Loading;
        self.latest
    }

    /// Apply a load result; returns false when the ticket is stale
    pub fn finish(&mut self, ticket: Ticket, result: Result<T, String>) -> bool {
        if ticket != self.latest {
            tracing::debug!(ticket, latest = self.latest, "dropping stale load result");
            return false;
        }
        self.state = match result {
            Ok(data) => LoadState::Loaded(data),
            Err(msg) => LoadState::Failed(msg),
        };
        true
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible > 0 && self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.offset = self.offset.min(self.selected);
    }
}
