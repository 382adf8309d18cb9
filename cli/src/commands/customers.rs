use colored::*;
use fleetdash_common::models::{Booking, Identity, Profile, ProfilePatch};
use fleetdash_core::services::CustomerService;

use crate::commands::{App, CustomerCommand};
use crate::terminal::{format, print, spinner};
use crate::{mprint, success};

fn display_name(profile: &Profile) -> String {
    let name: String = profile.full_name();
    if name.is_empty() { profile.id.clone() } else { name }
}

pub async fn run(app: &App, cmd: CustomerCommand) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let service: CustomerService = CustomerService::new(&app.repos);
    let q: u8 = app.cfg.quiet;

    match cmd {
        CustomerCommand::List => {
            let profiles: Vec<Profile> =
                spinner::run("Fetching customers...", service.list(&identity)).await?;
            print::header("customers", q);
            if profiles.is_empty() {
                print::no_results();
                return Ok(());
            }
            for (idx, profile) in profiles.iter().enumerate() {
                match q {
                    2 => print::print(&format!("{}\t{}", profile.id, display_name(profile))),
                    _ => {
                        print::tree_head(idx, &display_name(profile));
                        print::as_tree_one_level(format::profile_details(profile));
                    }
                }
                if q < 2 && idx + 1 != profiles.len() {
                    mprint!();
                }
            }
            if q == 0 {
                let admins: usize = profiles.iter().filter(|p| p.is_admin).count();
                print::summary(&format!(
                    "{} customers, {} admins",
                    profiles.len().to_string().bold().green(),
                    admins.to_string().bold().magenta()
                ));
            }
        }
        CustomerCommand::Show { id } => {
            let profile: Profile =
                spinner::run("Fetching customer...", service.get(&identity, &id)).await?;
            let bookings: Vec<Booking> = spinner::run(
                "Fetching booking history...",
                service.bookings_for(&identity, &id),
            )
            .await?;

            print::header("customer", q);
            print::tree_head(0, &display_name(&profile));
            print::as_tree_one_level(format::profile_details(&profile));

            mprint!();
            print::header("booking history", q);
            if bookings.is_empty() {
                print::note("no bookings yet");
            }
            for (idx, booking) in bookings.iter().enumerate() {
                print::tree_head(idx, &booking.car_label());
                print::as_tree_one_level(format::booking_details(booking));
            }
        }
        CustomerCommand::Update { id, profile, admin } => {
            let patch = ProfilePatch {
                first_name: profile.first_name,
                last_name: profile.last_name,
                phone_number: profile.phone,
                is_admin: admin,
                updated_at: None,
            };
            let updated: Profile =
                spinner::run("Updating customer...", service.update(&identity, &id, patch)).await?;
            success!("customer {} updated", display_name(&updated));
            print::tree_head(0, &display_name(&updated));
            print::as_tree_one_level(format::profile_details(&updated));
        }
        CustomerCommand::Remove { id } => {
            spinner::run("Deleting customer...", service.delete(&identity, &id)).await?;
            success!("customer {id} deleted");
        }
    }
    Ok(())
}
