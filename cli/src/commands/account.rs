use anyhow::Context;
use colored::*;
use console::Term;
use fleetdash_common::models::{AuthUser, Identity, Profile, ProfilePatch};
use fleetdash_core::services::{Registration, SignupProfile};

use crate::commands::{App, ProfileArgs};
use crate::success;
use crate::terminal::{colors, format, print, spinner};

fn read_password(given: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let term: Term = Term::stderr();
    term.write_str("Password: ")?;
    let password: String = term.read_secure_line().context("could not read password")?;
    Ok(password)
}

fn print_identity(identity: &Identity, q: u8) {
    print::header("account", q);
    print::align_keys(&["User", "E-mail", "Name", "Role", "Verified"]);
    print::aligned_line("User", format::id(identity.user_id()));
    print::aligned_line("E-mail", identity.user.email.clone().unwrap_or_default());
    print::aligned_line("Name", identity.display_name());

    let role: ColoredString = match (&identity.profile, identity.is_admin()) {
        (_, true) => "admin".bright_magenta(),
        (Some(_), false) => "customer".normal(),
        (None, _) => "no profile".color(colors::RENTED),
    };
    print::aligned_line("Role", role);
}

pub async fn login(app: &App, email: &str, password: Option<String>) -> anyhow::Result<()> {
    let password: String = read_password(password)?;
    let identity: Identity = spinner::run("Signing in...", app.auth.login(email, &password)).await?;

    success!("signed in as {}", identity.display_name());
    print_identity(&identity, app.cfg.quiet);
    Ok(())
}

pub async fn signup(
    app: &App,
    email: &str,
    password: Option<String>,
    profile: ProfileArgs,
) -> anyhow::Result<()> {
    let password: String = read_password(password)?;
    let profile = SignupProfile {
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone_number: profile.phone,
    };
    let registration: Registration =
        spinner::run("Creating account...", app.auth.signup(email, &password, profile)).await?;

    if registration.signed_in {
        success!("account created and signed in");
    } else {
        success!("account created, confirm your e-mail address before logging in");
    }
    print_identity(&registration.identity, app.cfg.quiet);
    Ok(())
}

pub async fn logout(app: &App) -> anyhow::Result<()> {
    spinner::run("Signing out...", app.auth.logout()).await?;
    success!("signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let verified: AuthUser = spinner::run("Verifying token...", app.auth.verify()).await?;

    print_identity(&identity, app.cfg.quiet);
    if let Some(email) = verified.email {
        print::aligned_line("Verified", email.color(colors::AVAILABLE));
    }
    if let Some(profile) = &identity.profile {
        print::aligned_line("Phone", profile.phone_number.clone().unwrap_or_default());
    }
    Ok(())
}

pub async fn update_profile(app: &App, args: ProfileArgs) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let patch = ProfilePatch {
        first_name: args.first_name,
        last_name: args.last_name,
        phone_number: args.phone,
        ..ProfilePatch::default()
    };

    let profile: Profile =
        spinner::run("Saving profile...", app.auth.update_profile(&identity, patch)).await?;
    success!("profile updated");

    print::header("profile", app.cfg.quiet);
    print::tree_head(0, &profile.full_name());
    print::as_tree_one_level(format::profile_details(&profile));
    Ok(())
}
