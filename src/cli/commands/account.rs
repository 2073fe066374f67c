use clap::{Arg, Command};

pub const LOGIN: &str = "login";
pub const WHOAMI: &str = "whoami";
pub const LOGOUT: &str = "logout";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(LOGIN)
                .about("Log in and store the access token")
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email address")
                        .env("SCHOOLGATE_EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("SCHOOLGATE_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(WHOAMI).about("Check the stored session and show the dashboard"),
        )
        .subcommand(Command::new(LOGOUT).about("Forget the stored access token"))
}
