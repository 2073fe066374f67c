use crate::{
    app::{App, Submission},
    dashboard::Dashboard,
    flash::FlashKind,
    validation::FieldErrors,
};
use anyhow::{anyhow, Result};

/// Prints the outcome of a form submission. Anything but `Done` becomes an
/// error so the process exits non-zero.
pub fn finish(app: &App, outcome: Submission) -> Result<()> {
    for (field, message) in app.field_errors().iter() {
        eprintln!("{field}: {message}");
    }

    match outcome {
        Submission::Done => {
            notice(app);
            Ok(())
        }
        Submission::Failed(error) => Err(error.into()),
        Submission::Invalid => Err(anyhow!(app
            .flash()
            .current()
            .filter(|message| message.kind == FlashKind::Error)
            .map_or_else(|| "invalid input".to_string(), |message| message.text))),
    }
}

/// Reports input rejected before the controller saw it.
pub fn rejected(errors: &FieldErrors) -> Result<()> {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
    Err(anyhow!("invalid input"))
}

/// Prints a visible success or info message.
pub fn notice(app: &App) {
    if let Some(message) = app.flash().current() {
        match message.kind {
            FlashKind::Error => eprintln!("{}", message.text),
            FlashKind::Success | FlashKind::Info => println!("{}", message.text),
        }
    }
}

pub fn dashboard(app: &App, dashboard: &Dashboard) {
    println!("{}", dashboard.greeting);
    if let Some(user) = app.session().user() {
        println!("{}", user.email);
    }
    for section in dashboard.sections {
        println!("  - {section}");
    }
}
