use crate::context::AppContext;
use anyhow::{Result, bail};
use folio_application::ProviderState;
use folio_core::document::{PortfolioDocument, asset_url};

pub async fn run(ctx: &AppContext, json: bool) -> Result<()> {
    let provider = ctx.content_provider();
    let state = provider.load().await?;

    let (document, source) = match &state {
        ProviderState::Ready(document) => (document, "backend"),
        ProviderState::Fallback(document) => (document, "fallback"),
        ProviderState::Failed(message) => bail!("{}", message),
        ProviderState::Idle | ProviderState::Loading => bail!("Document is not loaded"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(document)?);
        return Ok(());
    }

    let backend_url = provider.backend_url().await?;
    print_summary(document, source, backend_url.as_deref());
    Ok(())
}

fn print_summary(document: &PortfolioDocument, source: &str, backend_url: Option<&str>) {
    let resolve = |file: &str| match backend_url {
        Some(base) if !file.is_empty() => asset_url(base, file),
        _ => file.to_string(),
    };

    println!("{} - {} ({})", document.name, document.title, source);
    if let Some(image) = document.profile_image() {
        println!("Profile image: {}", resolve(image));
    }

    let sections: Vec<String> = document
        .sections
        .iter()
        .map(|(key, visible)| format!("{}={}", key, if visible { "on" } else { "off" }))
        .collect();
    println!("Sections: {}", sections.join(", "));

    println!("Projects ({}):", document.projects.len());
    for (index, project) in document.projects.iter().enumerate() {
        println!("  [{}] {} (id {})", index, project.title, project.id);
        if !project.description.is_empty() {
            println!("      {}", project.description);
        }
        if !project.tags.is_empty() {
            println!("      tags: {}", project.tags.join(", "));
        }
        if project.has_image() {
            println!("      image: {}", resolve(&project.image));
        }
    }
}
