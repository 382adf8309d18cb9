use colored::*;
use fleetdash_common::models::{Booking, BookingPatch, Identity};
use fleetdash_core::services::{BookingRequest, BookingService};

use crate::commands::{App, BookingCommand};
use crate::terminal::{format, print, spinner};
use crate::{mprint, success};

pub async fn run(app: &App, cmd: BookingCommand) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let service: BookingService = BookingService::new(&app.repos);
    let q: u8 = app.cfg.quiet;

    match cmd {
        BookingCommand::List { status } => {
            let mut bookings: Vec<Booking> =
                spinner::run("Fetching bookings...", service.list(&identity)).await?;
            if let Some(status) = status {
                bookings.retain(|b| b.status == status);
            }
            print::header("bookings", q);
            print_bookings(&bookings, q);
        }
        BookingCommand::Show { id } => {
            let booking: Booking =
                spinner::run("Fetching booking...", service.get(&identity, &id)).await?;
            print::header("booking", q);
            print_booking(0, &booking);
        }
        BookingCommand::Create {
            car,
            start,
            end,
            customer,
            amount,
            status,
        } => {
            let request = BookingRequest {
                user_id: customer,
                car_id: car,
                start_date: start,
                end_date: end,
                total_amount: amount,
                status,
            };
            let booking: Booking =
                spinner::run("Creating booking...", service.create(&identity, request)).await?;
            success!("booking {} created", booking.id);
            print_booking(0, &booking);
        }
        BookingCommand::Update {
            id,
            start,
            end,
            amount,
            status,
        } => {
            let patch = BookingPatch {
                start_date: start,
                end_date: end,
                total_amount: amount,
                status,
            };
            let booking: Booking =
                spinner::run("Updating booking...", service.update(&identity, &id, &patch)).await?;
            success!("booking {} updated", booking.id);
            print_booking(0, &booking);
        }
        BookingCommand::Cancel { id } => {
            let booking: Booking =
                spinner::run("Cancelling booking...", service.cancel(&identity, &id)).await?;
            success!("booking {} cancelled, car released", booking.id);
        }
        BookingCommand::Complete { id } => {
            let booking: Booking =
                spinner::run("Completing booking...", service.complete(&identity, &id)).await?;
            success!("booking {} completed, car released", booking.id);
        }
        BookingCommand::Remove { id } => {
            spinner::run("Deleting booking...", service.delete(&identity, &id)).await?;
            success!("booking {id} deleted");
        }
    }
    Ok(())
}

fn print_booking(idx: usize, booking: &Booking) {
    print::tree_head(idx, &booking.car_label());
    print::as_tree_one_level(format::booking_details(booking));
}

fn print_bookings(bookings: &[Booking], q: u8) {
    if bookings.is_empty() {
        print::no_results();
        return;
    }

    for (idx, booking) in bookings.iter().enumerate() {
        match q {
            2 => print::print(&format!(
                "{}\t{}\t{}\t{:.2}",
                booking.id,
                booking.status,
                booking.start_date.format("%Y-%m-%d"),
                booking.amount()
            )),
            _ => print_booking(idx, booking),
        }
        if q < 2 && idx + 1 != bookings.len() {
            mprint!();
        }
    }

    if q == 0 {
        let total: f64 = bookings.iter().map(Booking::amount).sum();
        let summary: String = format!(
            "{} bookings worth {}",
            bookings.len().to_string().bold().green(),
            format::money(total).bold()
        );
        print::summary(&summary);
    }
}
