//! CLI command for rendering a workspace tab.

use crate::models::{
    AuditLogEntry, ConsentPolicy, ConsentRecord, ConsentStatus, DataSubjectRequest, RequestStatus,
};
use crate::store::DomainStore;
use crate::views::{self, TypeCount};
use crate::workspace::{DashboardView, Tab, slice_color};
use serde::Serialize;
use std::io::{self, Write};

/// Output format for `view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewFormat {
    /// Plain-text tables.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Reports tab contents.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    /// Granted consents per type.
    pub granted_by_type: Vec<TypeCount>,
    /// Consent records per status.
    pub consent_status: Vec<StatusCount>,
    /// Requests per status, zero counts omitted.
    pub request_status: Vec<StatusCount>,
}

/// One status bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Status label.
    pub status: String,
    /// Number of items.
    pub count: usize,
}

impl ReportView {
    /// Computes the report from the store's current contents.
    #[must_use]
    pub fn from_store(store: &DomainStore) -> Self {
        let records = store.consent_records();
        let requests = store.dsr_requests();
        Self {
            granted_by_type: views::granted_by_type(&records),
            consent_status: views::consent_status_totals(&records)
                .into_iter()
                .map(|(status, count): (ConsentStatus, usize)| StatusCount {
                    status: status.to_string(),
                    count,
                })
                .collect(),
            request_status: views::request_status_totals(&requests)
                .into_iter()
                .map(|(status, count): (RequestStatus, usize)| StatusCount {
                    status: status.to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// Renders one tab of the store.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn cmd_view<W: Write>(
    writer: &mut W,
    store: &DomainStore,
    tab: Tab,
    format: ViewFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ViewFormat::Json => write_json(writer, store, tab),
        ViewFormat::Table => {
            writeln!(writer, "{}", tab.label())?;
            writeln!(writer, "{}", "=".repeat(tab.label().len()))?;
            match tab {
                Tab::Dashboard => write_dashboard(writer, &DashboardView::from_store(store))?,
                Tab::Records => write_records(writer, &store.consent_records())?,
                Tab::Policies => write_policies(writer, &store.consent_policies())?,
                Tab::Dsrs => write_requests(writer, &store.dsr_requests())?,
                Tab::Audit => write_audit(writer, &store.audit_logs())?,
                Tab::Reports => write_report(writer, &ReportView::from_store(store))?,
            }
            Ok(())
        },
    }
}

fn write_json<W: Write>(
    writer: &mut W,
    store: &DomainStore,
    tab: Tab,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = match tab {
        Tab::Dashboard => serde_json::to_string_pretty(&DashboardView::from_store(store))?,
        Tab::Records => serde_json::to_string_pretty(&store.consent_records())?,
        Tab::Policies => serde_json::to_string_pretty(&store.consent_policies())?,
        Tab::Dsrs => serde_json::to_string_pretty(&store.dsr_requests())?,
        Tab::Audit => serde_json::to_string_pretty(&store.audit_logs())?,
        Tab::Reports => serde_json::to_string_pretty(&ReportView::from_store(store))?,
    };
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Writes the dashboard: histogram, backlog card, recent activity.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_dashboard<W: Write>(writer: &mut W, dashboard: &DashboardView) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Consent by Type")?;
    write_histogram(writer, &dashboard.granted_by_type, dashboard.granted_total)?;

    writeln!(writer)?;
    writeln!(writer, "DSR Backlog")?;
    writeln!(writer, "  Open requests: {}", dashboard.backlog.total)?;
    writeln!(
        writer,
        "  Urgent/High:   {}",
        dashboard.backlog.urgent_or_high
    )?;
    if dashboard.backlog.pending_tasks.is_empty() {
        writeln!(writer, "  No pending tasks.")?;
    } else {
        writeln!(writer, "  Pending tasks:")?;
        for request in &dashboard.backlog.pending_tasks {
            writeln!(
                writer,
                "    {:<8}{:<22}{:<8}due {}",
                request.id,
                request.request_type.to_string(),
                request.priority.to_string(),
                request.due_date.format("%Y-%m-%d")
            )?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Recent Activity")?;
    write_records(writer, &dashboard.recent_activity)
}

/// Writes histogram slices with percentage labels and chart colors.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_histogram<W: Write>(
    writer: &mut W,
    slices: &[TypeCount],
    total: usize,
) -> io::Result<()> {
    if slices.is_empty() {
        return writeln!(writer, "  No granted consents.");
    }
    for (index, slice) in slices.iter().enumerate() {
        writeln!(
            writer,
            "  {:<24}{:>4}  {}",
            slice.label(total),
            slice.count,
            slice_color(index)
        )?;
    }
    Ok(())
}

/// Writes consent records as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_records<W: Write>(writer: &mut W, records: &[ConsentRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(writer, "  No consent records.");
    }
    writeln!(
        writer,
        "{:<6}{:<10}{:<14}{:<10}{:<22}SOURCE",
        "ID", "USER", "TYPE", "STATUS", "TIMESTAMP"
    )?;
    for record in records {
        writeln!(
            writer,
            "{:<6}{:<10}{:<14}{:<10}{:<22}{}",
            record.id,
            record.user_id,
            record.consent_type.to_string(),
            record.status.to_string(),
            record.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
            record.source
        )?;
    }
    Ok(())
}

/// Writes consent policies as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_policies<W: Write>(writer: &mut W, policies: &[ConsentPolicy]) -> io::Result<()> {
    if policies.is_empty() {
        return writeln!(writer, "  No consent policies.");
    }
    writeln!(
        writer,
        "{:<6}{:<30}{:<5}{:<9}{:<14}NEXT REVIEW",
        "ID", "NAME", "VER", "ACTIVE", "REGIONS"
    )?;
    for policy in policies {
        let next_review = policy
            .review_due_on()
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        writeln!(
            writer,
            "{:<6}{:<30}{:<5}{:<9}{:<14}{}",
            policy.id,
            policy.name,
            format!("v{}", policy.version),
            if policy.is_active { "yes" } else { "no" },
            policy.regions.join(","),
            next_review
        )?;
    }
    Ok(())
}

/// Writes data subject requests as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_requests<W: Write>(writer: &mut W, requests: &[DataSubjectRequest]) -> io::Result<()> {
    if requests.is_empty() {
        return writeln!(writer, "  No data subject requests.");
    }
    writeln!(
        writer,
        "{:<8}{:<10}{:<22}{:<13}{:<9}DUE",
        "ID", "USER", "TYPE", "STATUS", "PRIORITY"
    )?;
    for request in requests {
        writeln!(
            writer,
            "{:<8}{:<10}{:<22}{:<13}{:<9}{}",
            request.id,
            request.user_id,
            request.request_type.to_string(),
            request.status.to_string(),
            request.priority.to_string(),
            request.due_date.format("%Y-%m-%d")
        )?;
    }
    Ok(())
}

/// Writes audit entries as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_audit<W: Write>(writer: &mut W, entries: &[AuditLogEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(writer, "  No audit entries.");
    }
    writeln!(
        writer,
        "{:<22}{:<12}{:<26}{:<20}DETAILS",
        "TIMESTAMP", "USER", "ACTION", "ENTITY"
    )?;
    for entry in entries {
        writeln!(
            writer,
            "{:<22}{:<12}{:<26}{:<20}{}",
            entry.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
            entry.user_id,
            entry.action,
            format!("{} {}", entry.entity_type, entry.entity_id),
            entry.details
        )?;
    }
    Ok(())
}

/// Writes the compliance report.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_report<W: Write>(writer: &mut W, report: &ReportView) -> io::Result<()> {
    let granted_total = report.granted_by_type.iter().map(|s| s.count).sum();

    writeln!(writer)?;
    writeln!(writer, "Granted Consent by Type")?;
    write_histogram(writer, &report.granted_by_type, granted_total)?;

    writeln!(writer)?;
    writeln!(writer, "Consent Records by Status")?;
    for bucket in &report.consent_status {
        writeln!(writer, "  {:<14}{}", bucket.status, bucket.count)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Requests by Status")?;
    if report.request_status.is_empty() {
        writeln!(writer, "  No data subject requests.")?;
    }
    for bucket in &report.request_status {
        writeln!(writer, "  {:<14}{}", bucket.status, bucket.count)?;
    }
    Ok(())
}
