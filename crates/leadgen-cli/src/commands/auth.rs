use anyhow::Result;
use leadgen_core::user::{AuthService, SessionState};

use crate::context::AppContext;

pub async fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let user = ctx.auth.register(name, email, password).await?;
    println!("Welcome, {}! You are logged in as {}.", user.name, user.email);
    Ok(())
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let user = ctx.auth.login(email, password).await?;
    println!("Logged in as {} <{}>.", user.name, user.email);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.auth.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) {
    match ctx.auth.session_state().await {
        SessionState::Authenticated(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
        SessionState::Anonymous => println!("Not logged in."),
    }
}
