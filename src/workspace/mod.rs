//! Workspace view state.
//!
//! The workspace holds what the UI shows: the active tab, the assessment
//! panel, and a subscription to store changes. Views are never cached; a
//! change event only tells the caller it is time to pull again.

mod panel;
mod tab;

pub use panel::{AssessmentPanel, AssessmentState, FAILURE_PREFIX};
pub use tab::{CHART_COLORS, Tab, slice_color};

use crate::models::{ConsentRecord, StoreEvent};
use crate::store::DomainStore;
use crate::views::{self, BacklogSummary, TypeCount};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Everything the dashboard tab renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Granted consents per type, zero counts omitted.
    pub granted_by_type: Vec<TypeCount>,
    /// Sum of `granted_by_type` counts.
    pub granted_total: usize,
    /// DSR backlog card.
    pub backlog: BacklogSummary,
    /// Recent-activity table rows.
    pub recent_activity: Vec<ConsentRecord>,
}

impl DashboardView {
    /// Computes the dashboard from the store's current contents.
    #[must_use]
    pub fn from_store(store: &DomainStore) -> Self {
        let records = store.consent_records();
        let granted_by_type = views::granted_by_type(&records);
        let granted_total = granted_by_type.iter().map(|s| s.count).sum();
        Self {
            granted_by_type,
            granted_total,
            backlog: views::dsr_backlog(&store.dsr_requests()),
            recent_activity: views::recent_activity(&records),
        }
    }
}

/// UI state over a shared store.
pub struct Workspace {
    store: Arc<DomainStore>,
    active_tab: Tab,
    panel: AssessmentPanel,
    changes: broadcast::Receiver<StoreEvent>,
}

impl Workspace {
    /// Creates a workspace on the dashboard tab.
    #[must_use]
    pub fn new(store: Arc<DomainStore>) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            active_tab: Tab::Dashboard,
            panel: AssessmentPanel::new(),
            changes,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<DomainStore> {
        &self.store
    }

    /// Returns the active tab.
    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switches tabs and returns the previous one.
    pub fn select_tab(&mut self, tab: Tab) -> Tab {
        tracing::debug!(from = %self.active_tab, to = %tab, "Tab selected");
        std::mem::replace(&mut self.active_tab, tab)
    }

    /// Returns the assessment panel.
    #[must_use]
    pub const fn panel(&self) -> &AssessmentPanel {
        &self.panel
    }

    /// Returns the assessment panel for editing.
    pub const fn panel_mut(&mut self) -> &mut AssessmentPanel {
        &mut self.panel
    }

    /// Computes the dashboard from current store contents.
    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        DashboardView::from_store(&self.store)
    }

    /// Drains pending change notifications and returns how many arrived.
    ///
    /// A non-zero result means any view computed earlier is stale.
    pub fn refresh_pending(&mut self) -> usize {
        let mut changes = 0usize;
        loop {
            match self.changes.try_recv() {
                Ok(_) => changes += 1,
                Err(TryRecvError::Lagged(skipped)) => {
                    changes = changes.saturating_add(usize::try_from(skipped).unwrap_or(usize::MAX));
                },
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changes
    }
}
