pub mod account;
pub mod password;

mod output;
mod run;

use crate::{app::App, cli::globals::GlobalArgs, session::FileTokenStore};
use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Login(account::LoginArgs),
    Whoami(GlobalArgs),
    Logout(GlobalArgs),
    ForgotPassword(password::ForgotArgs),
    ResetPassword(password::ResetArgs),
    ChangePassword(password::ChangeArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action does not complete.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Controller backed by the token file named in `globals`.
fn open(globals: &GlobalArgs) -> Result<App> {
    let config = globals.config()?;
    let store = FileTokenStore::new(config.token_path.clone());
    Ok(App::new(&config, Box::new(store))?)
}
