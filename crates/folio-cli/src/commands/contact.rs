use crate::context::AppContext;
use anyhow::{Result, bail};
use folio_core::content::{ContactMessage, ContentRepository};

pub async fn run(ctx: &AppContext, name: String, email: String, message: String) -> Result<()> {
    if name.trim().is_empty() || email.trim().is_empty() || message.trim().is_empty() {
        bail!("Please fill in all fields");
    }
    let Some(backend_url) = ctx.backend_url().await? else {
        bail!("No backend URL configured; run `folio login` or set FOLIO_BACKEND_URL");
    };

    let message = ContactMessage {
        name,
        email,
        message,
    };
    ctx.repository.submit_contact(&backend_url, &message).await?;
    println!("Message sent");
    Ok(())
}
