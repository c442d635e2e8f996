use anyhow::{anyhow, Result};

use crate::{account::AccountService, storage::entities::UserEntity};

pub async fn register(
    accounts: &AccountService,
    name: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = accounts.register(name, email, password).await?;
    println!("Welcome, {}! You are now logged in.", user.name);
    Ok(())
}

pub async fn login(accounts: &AccountService, email: &str, password: &str) -> Result<()> {
    let user = accounts.login(email, password).await?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn logout(accounts: &AccountService) -> Result<()> {
    accounts.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(accounts: &AccountService) -> Result<()> {
    match accounts.current_user().await? {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn require_user(accounts: &AccountService) -> Result<UserEntity> {
    accounts.current_user().await?.ok_or_else(|| {
        anyhow!("Not logged in. Run `habitkeep register` or `habitkeep login` first")
    })
}
