use super::context::{AppContext, user_error};
use crate::LoginArgs;
use anyhow::{Result, bail};
use jobtrack_core::session::Registration;

pub async fn whoami(ctx: &AppContext, login: &LoginArgs) -> Result<()> {
    ctx.ensure_session(login).await?;
    let session = ctx.session.snapshot().await;
    match session.identity().and_then(|identity| identity.email.as_deref()) {
        Some(email) => println!("Logged in as {} <{}>", session.display_name(), email),
        None => println!("Logged in as {}", session.display_name()),
    }
    println!("Server: {}", ctx.config.base_url());
    Ok(())
}

pub async fn register(
    ctx: &AppContext,
    login: &LoginArgs,
    email: String,
    confirm: Option<String>,
) -> Result<()> {
    let (Some(username), Some(password)) = (&login.username, &login.password) else {
        bail!("register needs --username and --password");
    };

    let confirm = confirm.unwrap_or_else(|| password.clone());
    let registration =
        Registration::new(username.clone(), email, password.clone()).with_confirmation(confirm);

    match ctx.session.register(&registration).await {
        Ok(identity) => {
            println!("✓ Registered and logged in as {}", identity.username);
            Ok(())
        }
        Err(e) => Err(user_error(ctx.session.last_error().await, e)),
    }
}

pub async fn logout(ctx: &AppContext, login: &LoginArgs) -> Result<()> {
    ctx.ensure_session(login).await?;
    if let Err(e) = ctx.session.logout().await {
        return Err(user_error(ctx.session.last_error().await, e));
    }
    println!("✓ Logged out");
    Ok(())
}
