use clap::{Arg, Command};

pub const FORGOT_PASSWORD: &str = "forgot-password";
pub const RESET_PASSWORD: &str = "reset-password";
pub const CHANGE_PASSWORD: &str = "change-password";

fn secret(name: &'static str, help: &'static str, env: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .env(env)
        .hide_env_values(true)
        .required(true)
}

fn email() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email address")
        .env("SCHOOLGATE_EMAIL")
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(FORGOT_PASSWORD)
                .about("Request a one-time code by email")
                .arg(email()),
        )
        .subcommand(
            Command::new(RESET_PASSWORD)
                .about("Verify a one-time code and set a new password")
                .arg(email())
                .arg(
                    Arg::new("otp")
                        .long("otp")
                        .help("One-time code received by email")
                        .env("SCHOOLGATE_OTP")
                        .required(true),
                )
                .arg(secret(
                    "password",
                    "New password",
                    "SCHOOLGATE_NEW_PASSWORD",
                ))
                .arg(secret(
                    "password-confirmation",
                    "New password, repeated",
                    "SCHOOLGATE_NEW_PASSWORD_CONFIRMATION",
                )),
        )
        .subcommand(
            Command::new(CHANGE_PASSWORD)
                .about("Change the password of the signed-in user")
                .arg(secret(
                    "current-password",
                    "Current password",
                    "SCHOOLGATE_PASSWORD",
                ))
                .arg(secret(
                    "new-password",
                    "New password",
                    "SCHOOLGATE_NEW_PASSWORD",
                ))
                .arg(secret(
                    "new-password-confirmation",
                    "New password, repeated",
                    "SCHOOLGATE_NEW_PASSWORD_CONFIRMATION",
                )),
        )
}
