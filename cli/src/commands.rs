use crate::{AdminAction, Args, Command, ConfigAction, render};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use folio_core::FolioCore;
use folio_core::admin::AdminGate;
use folio_core::notify;
use folio_core::profile::{Profile, ProfileSource};
use folio_core::types::{AppConfig, Config, ContactForm, Notification};
use folio_core::workflow::SubmitOutcome;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

pub fn run(args: Args) -> Result<ExitCode> {
    let config = Config {
        base_path: args.data_dir,
    };
    let config_path = args.config.unwrap_or_else(|| config.config_path());

    match args.command {
        Command::Config { action } => config_command(action, &config_path),
        Command::Submit {
            name,
            email,
            phone,
            message,
        } => {
            let app = load_app_config(&config_path)?;
            let form = ContactForm {
                name,
                email,
                phone,
                message,
            };
            submit(config, &app, form)
        }
        Command::DownloadAll => {
            let app = load_app_config(&config_path)?;
            let mut core = FolioCore::open(config, &app);
            let mut contact = core.contact_form(notify::from_config(&app.notifier));
            let notification = contact.download_all(Utc::now());
            render::notification(&notification);
            Ok(exit_code(&notification))
        }
        Command::Admin { action } => {
            let app = load_app_config(&config_path)?;
            admin(config, &app, action)
        }
        Command::Profile { source } => {
            let app = load_app_config(&config_path)?;
            profile(&config, &app, source)
        }
    }
}

/// Loads config.toml, replacing invalid values with defaults.
fn load_app_config(path: &Path) -> Result<AppConfig> {
    let app = AppConfig::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    let errors = app.validate();
    if errors.is_empty() {
        return Ok(app);
    }
    for error in &errors {
        warn!(%error, "invalid config value, using default");
    }
    Ok(app.with_defaults_for_invalid())
}

fn exit_code(notification: &Notification) -> ExitCode {
    if notification.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn submit(config: Config, app: &AppConfig, form: ContactForm) -> Result<ExitCode> {
    let source = profile_source(&config, app, None);
    let mut core = FolioCore::open(config, app);
    if core.needs_profile() {
        match Profile::load(&source) {
            Ok(profile) => core.adopt_profile(&profile),
            Err(e) => warn!(error = %e, %source, "owner details unavailable from profile"),
        }
    }

    let mut contact = core.contact_form(notify::from_config(&app.notifier));
    contact.fill(form);
    match contact.submit_with_progress(Utc::now(), render::notification) {
        SubmitOutcome::Rejected(errors) => {
            render::field_errors(&errors);
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Disabled(notification) | SubmitOutcome::Failed(notification) => {
            render::notification(&notification);
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Sent {
            notification,
            export,
            ..
        } => {
            render::notification(&notification);
            if let Some(path) = export {
                println!("Saved a copy to {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn admin(config: Config, app: &AppConfig, action: AdminAction) -> Result<ExitCode> {
    let mut core = FolioCore::open(config, app);
    let gate = AdminGate::from_config(&app.admin);

    let attempt =
        rpassword::prompt_password("Enter admin password: ").context("failed to read password")?;
    let mut panel = match core.admin_panel(&gate, &attempt) {
        Ok(panel) => panel,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    if let Some(notification) = panel.load_notification() {
        render::notification(&notification);
        return Ok(ExitCode::FAILURE);
    }

    match action {
        AdminAction::List => {
            print!("{}", render::listing(panel.list()));
            Ok(ExitCode::SUCCESS)
        }
        AdminAction::Count => {
            println!("{}", panel.count());
            Ok(ExitCode::SUCCESS)
        }
        AdminAction::Export => {
            let notification = panel.export_all(Utc::now());
            render::notification(&notification);
            Ok(exit_code(&notification))
        }
        AdminAction::Clear { yes } => match panel.clear_all(|prompt| yes || render::confirm(prompt)) {
            Some(notification) => {
                render::notification(&notification);
                Ok(exit_code(&notification))
            }
            None => {
                println!("Cancelled");
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

/// Profile location: the command-line flag, then config, then the data directory.
fn profile_source(config: &Config, app: &AppConfig, flag: Option<String>) -> ProfileSource {
    flag.or_else(|| app.profile.source.clone())
        .map(|raw| ProfileSource::parse(&raw))
        .unwrap_or_else(|| ProfileSource::File(config.default_profile_path()))
}

fn profile(config: &Config, app: &AppConfig, source: Option<String>) -> Result<ExitCode> {
    let source = profile_source(config, app, source);

    match Profile::load(&source) {
        Ok(profile) => {
            print!("{}", profile.summary());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprint!("{}", render::load_failure(&source, &e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn config_command(action: ConfigAction, path: &Path) -> Result<ExitCode> {
    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            AppConfig::default()
                .save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Check => {
            let app = AppConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            let errors = app.validate();
            if errors.is_empty() {
                println!("{} is valid", path.display());
                return Ok(ExitCode::SUCCESS);
            }
            for error in errors {
                eprintln!("- {error}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
