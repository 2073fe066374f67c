use crate::cli::{
    actions::{account, password, Action},
    commands::{self, account as account_cmd, password as password_cmd},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

fn string(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn secret(matches: &ArgMatches, name: &str) -> Result<SecretString> {
    string(matches, name).map(SecretString::from)
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = string(matches, commands::ARG_API_URL)?;
    let timeout = matches
        .get_one::<u64>(commands::ARG_TIMEOUT)
        .copied()
        .map_or(crate::config::DEFAULT_TIMEOUT, Duration::from_secs);
    let token_file = matches.get_one::<PathBuf>(commands::ARG_TOKEN_FILE).cloned();

    Ok(GlobalArgs {
        api_url,
        token_file,
        timeout,
    })
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some((account_cmd::LOGIN, sub)) => Ok(Action::Login(account::LoginArgs {
            globals,
            email: string(sub, "email")?,
            password: secret(sub, "password")?,
        })),
        Some((account_cmd::WHOAMI, _)) => Ok(Action::Whoami(globals)),
        Some((account_cmd::LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((password_cmd::FORGOT_PASSWORD, sub)) => {
            Ok(Action::ForgotPassword(password::ForgotArgs {
                globals,
                email: string(sub, "email")?,
            }))
        }
        Some((password_cmd::RESET_PASSWORD, sub)) => Ok(Action::ResetPassword(password::ResetArgs {
            globals,
            email: string(sub, "email")?,
            otp: string(sub, "otp")?,
            password: secret(sub, "password")?,
            password_confirmation: secret(sub, "password-confirmation")?,
        })),
        Some((password_cmd::CHANGE_PASSWORD, sub)) => {
            Ok(Action::ChangePassword(password::ChangeArgs {
                globals,
                current_password: secret(sub, "current-password")?,
                new_password: secret(sub, "new-password")?,
                new_password_confirmation: secret(sub, "new-password-confirmation")?,
            }))
        }
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn matches(args: &[&str]) -> Result<ArgMatches> {
        Ok(commands::new().try_get_matches_from(args)?)
    }

    #[test]
    fn test_login_action() -> Result<()> {
        temp_env::with_vars([("SCHOOLGATE_TIMEOUT", None::<&str>)], || {
            let action = handler(&matches(&[
                "schoolgate",
                "--api-url",
                "https://api.school.tld",
                "--timeout",
                "5",
                "login",
                "--email",
                "ada@school.tld",
                "--password",
                "Secret1!",
            ])?)?;

            let Action::Login(args) = action else {
                anyhow::bail!("expected a login action");
            };
            assert_eq!(args.globals.api_url, "https://api.school.tld");
            assert_eq!(args.globals.timeout, Duration::from_secs(5));
            assert_eq!(args.email, "ada@school.tld");
            assert_eq!(args.password.expose_secret(), "Secret1!");
            Ok(())
        })
    }

    #[test]
    fn test_reset_password_action() -> Result<()> {
        temp_env::with_vars(
            [
                ("SCHOOLGATE_NEW_PASSWORD", Some("NewSecret1!")),
                ("SCHOOLGATE_NEW_PASSWORD_CONFIRMATION", Some("NewSecret1!")),
            ],
            || {
                let action = handler(&matches(&[
                    "schoolgate",
                    "--api-url",
                    "https://api.school.tld",
                    "reset-password",
                    "--email",
                    "ada@school.tld",
                    "--otp",
                    "123456",
                ])?)?;

                let Action::ResetPassword(args) = action else {
                    anyhow::bail!("expected a reset-password action");
                };
                assert_eq!(args.otp, "123456");
                assert_eq!(args.password.expose_secret(), "NewSecret1!");
                assert_eq!(args.password_confirmation.expose_secret(), "NewSecret1!");
                Ok(())
            },
        )
    }

    #[test]
    fn test_whoami_action() -> Result<()> {
        let action = handler(&matches(&[
            "schoolgate",
            "--api-url",
            "https://api.school.tld",
            "--token-file",
            "/tmp/schoolgate/token",
            "whoami",
        ])?)?;

        let Action::Whoami(globals) = action else {
            anyhow::bail!("expected a whoami action");
        };
        assert_eq!(globals.token_file, Some(PathBuf::from("/tmp/schoolgate/token")));
        Ok(())
    }
}
