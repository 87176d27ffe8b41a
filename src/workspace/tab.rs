//! Workspace tabs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six workspace tabs.
///
/// Any tab can be selected from any other and none is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    /// Aggregates and previews.
    #[default]
    Dashboard,
    /// Every consent record.
    #[serde(rename = "Consent Records")]
    Records,
    /// Consent policies.
    #[serde(rename = "Consent Policies")]
    Policies,
    /// Data subject requests.
    #[serde(rename = "DSR Requests")]
    Dsrs,
    /// The audit trail.
    #[serde(rename = "Audit Log")]
    Audit,
    /// Compliance reports.
    Reports,
}

impl Tab {
    /// Returns every tab in navigation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Dashboard,
            Self::Records,
            Self::Policies,
            Self::Dsrs,
            Self::Audit,
            Self::Reports,
        ]
    }

    /// Returns the navigation label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Records => "Consent Records",
            Self::Policies => "Consent Policies",
            Self::Dsrs => "DSR Requests",
            Self::Audit => "Audit Log",
            Self::Reports => "Reports",
        }
    }

    /// Parses a tab from its label or a short alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "dashboard" | "home" => Some(Self::Dashboard),
            "consentrecords" | "records" | "consents" => Some(Self::Records),
            "consentpolicies" | "policies" => Some(Self::Policies),
            "dsrrequests" | "dsrs" | "dsr" | "requests" => Some(Self::Dsrs),
            "auditlog" | "audit" => Some(Self::Audit),
            "reports" | "report" => Some(Self::Reports),
            _ => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Chart colors, assigned to slices by position.
pub const CHART_COLORS: [&str; 4] = ["#06b6d4", "#8b5cf6", "#10b981", "#f59e0b"];

/// Returns the chart color for the slice at `index`.
#[must_use]
pub const fn slice_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for tab in Tab::all() {
            assert_eq!(Tab::parse(tab.label()), Some(*tab));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Tab::parse("dsr"), Some(Tab::Dsrs));
        assert_eq!(Tab::parse("audit-log"), Some(Tab::Audit));
        assert_eq!(Tab::parse("settings"), None);
    }

    #[test]
    fn test_default_is_dashboard() {
        assert_eq!(Tab::default(), Tab::Dashboard);
    }

    #[test]
    fn test_slice_color_wraps() {
        assert_eq!(slice_color(0), "#06b6d4");
        assert_eq!(slice_color(4), "#06b6d4");
    }
}
