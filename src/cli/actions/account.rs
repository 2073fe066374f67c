use super::{open, output};
use crate::{cli::globals::GlobalArgs, page::Page, validation::LoginForm};
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

/// # Errors
/// Returns an error if the login is rejected or the token cannot be stored.
pub async fn login(args: LoginArgs) -> Result<()> {
    let mut app = open(&args.globals)?;
    app.navigate(Page::Login);

    let form = LoginForm::new(args.email, args.password.expose_secret());
    let outcome = app.login(&form).await?;
    output::finish(&app, outcome)?;

    if let Some(dashboard) = app.dashboard() {
        output::dashboard(&app, &dashboard);
    }
    Ok(())
}

/// Checks the stored token against the API and shows the dashboard.
///
/// # Errors
/// Returns an error when nobody is signed in.
pub async fn whoami(globals: &GlobalArgs) -> Result<()> {
    let mut app = open(globals)?;
    app.initialize().await?;

    match app.dashboard() {
        Some(dashboard) => {
            output::dashboard(&app, &dashboard);
            Ok(())
        }
        None => {
            info!("no active session, page is {}", app.page());
            output::notice(&app);
            bail!("not logged in")
        }
    }
}

/// # Errors
/// Returns an error if the token file cannot be removed.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let mut app = open(globals)?;
    app.logout()?;
    output::notice(&app);
    Ok(())
}
