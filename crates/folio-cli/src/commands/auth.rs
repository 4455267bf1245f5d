use crate::context::AppContext;
use anyhow::Result;

pub async fn login(ctx: &AppContext, url: &str, password: &str) -> Result<()> {
    let session = ctx.edit_session().await?;
    session.login(url, password).await?;

    let status = session.status().await;
    println!(
        "{}",
        status
            .message
            .unwrap_or_else(|| "Authentication successful".to_string())
    );
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    let session = ctx.edit_session().await?;
    session.logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn status(ctx: &AppContext) -> Result<()> {
    let session = ctx.edit_session().await?;
    let backend_url = ctx.backend_url().await?;

    println!("Session:  {}", session.phase().await);
    println!(
        "Backend:  {}",
        backend_url.as_deref().unwrap_or("(none, fallback content)")
    );
    println!("Timeout:  {} ms", ctx.config.request_timeout().as_millis());
    Ok(())
}
