use super::context::{AppContext, view_state};
use crate::{LoginArgs, ViewArgs};
use anyhow::{Result, anyhow, bail};
use jobtrack_application::{Dashboard, DeleteConfirmation, NotesEditing};
use jobtrack_core::job::{JobDraft, JobId, JobPatch, JobRecord, JobStatus};

/// Record fields given on the command line.
pub struct JobFields {
    pub company: Option<String>,
    pub position: Option<String>,
    pub resume: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

impl JobFields {
    fn into_draft(self) -> JobDraft {
        JobDraft {
            company: self.company.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            resume_used: self.resume.unwrap_or_default(),
            date_applied: self.date.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        }
    }

    fn into_patch(self) -> JobPatch {
        JobPatch {
            company: self.company,
            position: self.position,
            resume_used: self.resume,
            date_applied: self.date,
            status: self.status.map(JobStatus::from),
            ..JobPatch::default()
        }
    }
}

pub fn print_record(record: &JobRecord) {
    let reminder = if record.has_reminder() { " ⏰" } else { "" };
    println!(
        "{:>6}  {:<10}  {:<10}  {:<24}  {}{}",
        record.id,
        record.date_applied.as_deref().unwrap_or("-"),
        record.status_label(),
        record.company,
        record.position,
        reminder
    );
}

pub async fn list(ctx: &AppContext, login: &LoginArgs, args: &ViewArgs) -> Result<()> {
    ctx.load_records(login).await?;

    let mut dashboard = Dashboard::new(ctx.session.clone(), ctx.records.clone());
    dashboard.view = view_state(args)?;
    let snapshot = dashboard.snapshot().await;
    let visible = snapshot.visible();

    println!("Applications for {}", dashboard.greeting().await);
    if visible.is_empty() {
        println!("No applications found.");
        return Ok(());
    }
    for record in &visible {
        print_record(record);
    }
    println!("{} of {} shown", visible.len(), snapshot.records.len());
    Ok(())
}

pub async fn add(ctx: &AppContext, login: &LoginArgs, fields: JobFields) -> Result<()> {
    ctx.ensure_session(login).await?;

    let mut draft = fields.into_draft();
    let company = draft.company.clone();
    if let Err(e) = ctx.records.create(&mut draft).await {
        return Err(ctx.record_error(e).await);
    }
    println!("✓ Added application at {}", company);
    Ok(())
}

pub async fn edit(ctx: &AppContext, login: &LoginArgs, id: &str, fields: JobFields) -> Result<()> {
    ctx.load_records(login).await?;

    let patch = fields.into_patch();
    if patch.is_empty() {
        bail!("Nothing to change; pass at least one field");
    }
    match ctx.records.update(&JobId::from(id), patch).await {
        Ok(record) => {
            print_record(&record);
            Ok(())
        }
        Err(e) => Err(ctx.record_error(e).await),
    }
}

pub async fn notes(
    ctx: &AppContext,
    login: &LoginArgs,
    id: &str,
    notes: Option<String>,
    reminder_date: Option<String>,
    reminder_text: Option<String>,
) -> Result<()> {
    ctx.load_records(login).await?;

    let record = ctx
        .records
        .find(&JobId::from(id))
        .await
        .ok_or_else(|| anyhow!("No application with id {}", id))?;

    let mut editing = NotesEditing::open(&record);
    if let Some(notes) = notes {
        editing.draft.notes = notes;
    }
    if let Some(date) = reminder_date {
        editing.draft.reminder_date = date;
    }
    if let Some(text) = reminder_text {
        editing.draft.reminder_text = text;
    }

    match ctx.records.save_notes(&editing).await {
        Ok(saved) => {
            println!("✓ Notes saved for {} / {}", saved.company, saved.position);
            Ok(())
        }
        Err(e) => Err(ctx.record_error(e).await),
    }
}

pub async fn delete(ctx: &AppContext, login: &LoginArgs, id: &str, yes: bool) -> Result<()> {
    let prompt = DeleteConfirmation::request(id);
    if !yes {
        prompt.dismiss();
        bail!("Refusing to delete application {} without --yes", id);
    }

    ctx.ensure_session(login).await?;
    if let Err(e) = ctx.records.remove(prompt.confirm()).await {
        return Err(ctx.record_error(e).await);
    }
    println!("✓ Deleted application {}", id);
    Ok(())
}
