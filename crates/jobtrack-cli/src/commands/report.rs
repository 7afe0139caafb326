use super::context::{AppContext, today, view_state};
use super::jobs::print_record;
use crate::{LoginArgs, ViewArgs};
use anyhow::{Context, Result, anyhow};
use jobtrack_application::{Dashboard, ExportRequest, ExportScope};
use jobtrack_core::export::ExportFormat;
use jobtrack_core::timeline::MonthSelection;
use std::path::Path;

pub async fn stats(ctx: &AppContext, login: &LoginArgs) -> Result<()> {
    ctx.load_records(login).await?;

    let dashboard = Dashboard::new(ctx.session.clone(), ctx.records.clone());
    let stats = dashboard.snapshot().await.analytics(today());

    println!("Total applications: {}", stats.total);
    for (status, count) in &stats.by_status {
        println!("  {:<10} {}", status.label(), count);
    }
    if stats.other_status > 0 {
        println!("  {:<10} {}", "Unknown", stats.other_status);
    }
    println!("Applied in the last 30 days: {}", stats.recent);
    Ok(())
}

pub async fn timeline(
    ctx: &AppContext,
    login: &LoginArgs,
    month: Option<&str>,
    args: &ViewArgs,
) -> Result<()> {
    ctx.load_records(login).await?;

    let mut dashboard = Dashboard::new(ctx.session.clone(), ctx.records.clone());
    dashboard.view = view_state(args)?;
    if let Some(month) = month {
        dashboard.month = month.parse::<MonthSelection>().map_err(|e| anyhow!(e))?;
    }

    let snapshot = dashboard.snapshot().await;
    let timeline = snapshot.timeline();
    if timeline.groups.is_empty() {
        println!("No dated applications.");
        return Ok(());
    }

    for group in &timeline.groups {
        if let MonthSelection::Month(key) = snapshot.month
            && key != group.key
        {
            continue;
        }
        println!("{} ({})", group.label, group.len());
        for record in &group.records {
            print_record(record);
        }
    }
    Ok(())
}

pub async fn export(
    ctx: &AppContext,
    login: &LoginArgs,
    format: &str,
    include_extended: bool,
    filtered: bool,
    args: &ViewArgs,
    out: &Path,
) -> Result<()> {
    let format: ExportFormat = format
        .parse()
        .map_err(|_| anyhow!("Unknown export format '{}'; use csv or json", format))?;
    ctx.load_records(login).await?;

    let mut dashboard = Dashboard::new(ctx.session.clone(), ctx.records.clone());
    dashboard.view = view_state(args)?;

    let request = ExportRequest {
        format,
        include_extended,
        scope: if filtered {
            ExportScope::Filtered
        } else {
            ExportScope::All
        },
    };
    let document = dashboard.export(request, today()).await?;

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    let path = out.join(&document.filename);
    std::fs::write(&path, &document.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Exported to {}", path.display());
    Ok(())
}
