//! Edit commands: connect, apply one change, save.

use crate::context::AppContext;
use anyhow::{Context, Result, bail};
use folio_application::{EditSession, UploadTarget};
use folio_core::content::AssetUpload;
use folio_core::document::{DocumentMutation, ProjectField, ScalarField, SectionKey};
use std::path::Path;

async fn connect(ctx: &AppContext) -> Result<EditSession> {
    let session = ctx.edit_session().await?;
    let Some(backend_url) = ctx.backend_url().await? else {
        bail!("No backend URL configured; run `folio login --url <url> --password <password>`");
    };
    session.connect(&backend_url).await?;
    Ok(session)
}

async fn save_if_changed(session: &EditSession, changed: bool) -> Result<()> {
    if !changed {
        println!("Nothing changed");
        return Ok(());
    }
    let receipt = session.save().await?;
    let status = session.status().await;
    println!(
        "{}",
        receipt
            .message
            .or(status.message)
            .unwrap_or_else(|| "Saved successfully!".to_string())
    );
    Ok(())
}

async fn apply_and_save(ctx: &AppContext, mutation: DocumentMutation) -> Result<()> {
    let session = connect(ctx).await?;
    let changed = session.apply(mutation).await;
    save_if_changed(&session, changed).await
}

pub async fn set(ctx: &AppContext, field: &str, value: String) -> Result<()> {
    let field: ScalarField = field.parse().map_err(anyhow::Error::msg)?;
    apply_and_save(ctx, DocumentMutation::SetScalar(field, value)).await
}

pub async fn section(ctx: &AppContext, key: &str, state: &str) -> Result<()> {
    let key: SectionKey = key.parse().map_err(anyhow::Error::msg)?;
    let mutation = DocumentMutation::from_path(&format!("sections.{}", key), state)
        .map_err(anyhow::Error::msg)?;
    apply_and_save(ctx, mutation).await
}

pub async fn project_set(ctx: &AppContext, index: usize, field: &str, value: String) -> Result<()> {
    let field: ProjectField = field.parse().map_err(anyhow::Error::msg)?;
    let session = connect(ctx).await?;
    let changed = session
        .apply(DocumentMutation::SetProjectField {
            index,
            field,
            value,
        })
        .await;
    if !changed {
        warn_if_missing(&session, index).await;
    }
    save_if_changed(&session, changed).await
}

pub async fn tags(ctx: &AppContext, index: usize, raw: String) -> Result<()> {
    let session = connect(ctx).await?;
    let changed = session.set_project_tags(index, raw).await;
    if !changed {
        warn_if_missing(&session, index).await;
    }
    save_if_changed(&session, changed).await
}

pub async fn add_project(ctx: &AppContext) -> Result<()> {
    let session = connect(ctx).await?;
    let id = session
        .add_project()
        .await
        .context("No working copy to add a project to")?;
    println!("Added project {}", id);
    save_if_changed(&session, true).await
}

pub async fn remove_project(ctx: &AppContext, index: usize) -> Result<()> {
    let session = connect(ctx).await?;
    let changed = session.remove_project(index).await;
    if !changed {
        warn_if_missing(&session, index).await;
    }
    save_if_changed(&session, changed).await
}

pub async fn upload(ctx: &AppContext, target: &str, path: &str) -> Result<()> {
    let target: UploadTarget = target.parse()?;
    let path = Path::new(path);
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("Upload path has no file name")?;

    let session = connect(ctx).await?;
    let filename = session
        .upload_image(AssetUpload::new(file_name, bytes), target)
        .await?;
    println!("Image uploaded as {}", filename);
    save_if_changed(&session, session.is_dirty().await).await
}

async fn warn_if_missing(session: &EditSession, index: usize) {
    let count = session
        .working_copy()
        .await
        .map_or(0, |document| document.projects.len());
    if index >= count {
        eprintln!("No project at index {} ({} projects)", index, count);
    }
}
