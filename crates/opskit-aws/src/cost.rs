//! Cost Explorer: unblended cost for the trailing window, grouped by service.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_costexplorer::types::{DateInterval, Granularity, GroupDefinition, GroupDefinitionType};
use aws_sdk_costexplorer::Client;
use chrono::{Duration, NaiveDate, Utc};
use opskit_core::{OpsError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CostLine {
    pub service: String,
    pub amount: String,
    pub unit: String,
}

#[derive(Debug, Serialize)]
pub struct CostReport {
    pub start: String,
    pub end: String,
    pub lines: Vec<CostLine>,
    pub total: f64,
}

/// The [start, end) day window Cost Explorer expects for "the last N days",
/// ending today (exclusive).
pub fn trailing_window(today: NaiveDate, days: u32) -> (String, String) {
    let start = today - Duration::days(i64::from(days));
    (
        start.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

pub struct Costs {
    client: Client,
}

impl Costs {
    pub fn new(ctx: &AwsContext) -> Self {
        Costs {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn by_service(&self, days: u32) -> Result<CostReport> {
        let (start, end) = trailing_window(Utc::now().date_naive(), days);
        let action = format!("fetch cost for {start}..{end}");

        let period = DateInterval::builder()
            .start(start.as_str())
            .end(end.as_str())
            .build()
            .map_err(|e| OpsError::remote(action.as_str(), e))?;

        let out = self
            .client
            .get_cost_and_usage()
            .time_period(period)
            .granularity(Granularity::Monthly)
            .metrics("UnblendedCost")
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key("SERVICE")
                    .build(),
            )
            .send()
            .await
            .map_err(|e| remote_failure(&action, &e))?;

        let mut lines = Vec::new();
        let mut total = 0.0_f64;
        for result in out.results_by_time() {
            for group in result.groups() {
                let service = group.keys().first().cloned().unwrap_or_default();
                let Some(metric) = group
                    .metrics()
                    .and_then(|m| m.get("UnblendedCost"))
                else {
                    continue;
                };
                let amount = metric.amount().unwrap_or("0").to_string();
                total += amount.parse::<f64>().unwrap_or(0.0);
                lines.push(CostLine {
                    service,
                    amount,
                    unit: metric.unit().unwrap_or("USD").to_string(),
                });
            }
        }
        lines.sort_by(|a, b| {
            let av = a.amount.parse::<f64>().unwrap_or(0.0);
            let bv = b.amount.parse::<f64>().unwrap_or(0.0);
            bv.partial_cmp(&av).unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(CostReport {
            start,
            end,
            lines,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ends_today_exclusive() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = trailing_window(today, 30);
        assert_eq!(start, "2025-02-08");
        assert_eq!(end, "2025-03-10");
    }

    #[test]
    fn one_day_window() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (start, end) = trailing_window(today, 1);
        assert_eq!(start, "2025-02-28");
        assert_eq!(end, "2025-03-01");
    }
}
