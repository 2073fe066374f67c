use crate::cli::actions::{account, password, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => account::login(args).await,
        Action::Whoami(globals) => account::whoami(&globals).await,
        Action::Logout(globals) => account::logout(&globals),
        Action::ForgotPassword(args) => password::forgot(args).await,
        Action::ResetPassword(args) => password::reset(args).await,
        Action::ChangePassword(args) => password::change(args).await,
    }
}
