use crate::output::{print_json, print_table};
use anyhow::Result;
use opskit_aws::cost::Costs;
use opskit_aws::AwsContext;
use opskit_core::Settings;

pub async fn run(settings: &Settings, days: u32, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let report = Costs::new(&ctx).by_service(days).await?;

    if json {
        return print_json(&report);
    }

    println!("unblended cost {} .. {}", report.start, report.end);
    print_table(
        &["SERVICE", "AMOUNT", "UNIT"],
        report
            .lines
            .iter()
            .map(|l| vec![l.service.clone(), l.amount.clone(), l.unit.clone()])
            .collect(),
    );
    println!("\ntotal: {:.2}", report.total);
    Ok(())
}
