use crate::error::{ApiError, Operation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub customers: u64,
    #[serde(default)]
    pub leads: u64,
    #[serde(default)]
    pub open_tickets: u64,
    #[serde(default)]
    pub activities: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineRow {
    pub status: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub pipeline: Vec<PipelineRow>,
}

impl Overview {
    /// Stat cards as (title, value), in display order.
    pub fn stats(&self) -> [(&'static str, u64); 4] {
        [
            ("Customers", self.totals.customers),
            ("Leads", self.totals.leads),
            ("Open Tickets", self.totals.open_tickets),
            ("Activities", self.totals.activities),
        ]
    }
}

/// One-shot fetch state for the dashboard; rebuilt on every mount.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverviewState {
    pub data: Option<Overview>,
    pub error: Option<String>,
}

impl OverviewState {
    pub fn finish(&mut self, result: Result<Overview, ApiError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                tracing::debug!("overview fetch failed: {err}");
                self.error = Some(err.user_message(Operation::Overview));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    /// `None` when there is nothing to show, so no section is rendered.
    pub fn pipeline(&self) -> Option<&[PipelineRow]> {
        self.data
            .as_ref()
            .map(|d| d.pipeline.as_slice())
            .filter(|rows| !rows.is_empty())
    }
}
