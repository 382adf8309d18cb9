use colored::*;
use fleetdash_common::models::{Car, CarPatch, NewCar, Review};
use fleetdash_core::services::{ReviewService, VehicleService};
use tracing::warn;

use crate::commands::{App, VehicleCommand};
use crate::terminal::{format, print, spinner};
use crate::{mprint, success};

pub async fn run(app: &App, cmd: VehicleCommand) -> anyhow::Result<()> {
    app.identity().await?;
    let service: VehicleService = VehicleService::new(&app.repos);
    let q: u8 = app.cfg.quiet;

    match cmd {
        VehicleCommand::List { available } => {
            let cars: Vec<Car> = if available {
                spinner::run("Fetching available vehicles...", service.list_available()).await?
            } else {
                spinner::run("Fetching fleet...", service.list()).await?
            };
            print::header(if available { "available vehicles" } else { "fleet" }, q);
            print_cars(&cars, q);
        }
        VehicleCommand::Show { id } => {
            let car: Car = spinner::run("Fetching vehicle...", service.get(&id)).await?;
            let reviews: Vec<Review> = spinner::run(
                "Fetching reviews...",
                ReviewService::new(&app.repos).for_car(&car.id),
            )
            .await
            .unwrap_or_else(|e| {
                warn!("reviews unavailable: {e}");
                Vec::new()
            });

            print::header("vehicle", q);
            print_car(0, &car);
            if !reviews.is_empty() {
                mprint!();
                print::header("reviews", q);
                for (idx, review) in reviews.iter().enumerate() {
                    print::tree_head(idx, &review.comment.clone().unwrap_or_default());
                    print::as_tree_one_level(format::review_details(review));
                }
            }
        }
        VehicleCommand::Add {
            make,
            model,
            year,
            plate,
            rate,
            image_url,
            unavailable,
        } => {
            let car = NewCar {
                make,
                model,
                year,
                license_plate: plate,
                daily_rate: rate,
                is_available: !unavailable,
                image_url,
            };
            let created: Car = spinner::run("Adding vehicle...", service.create(&car)).await?;
            success!("added {}", created.label());
            print_car(0, &created);
        }
        VehicleCommand::Update {
            id,
            make,
            model,
            year,
            plate,
            rate,
            image_url,
            available,
        } => {
            let patch = CarPatch {
                make,
                model,
                year,
                license_plate: plate,
                daily_rate: rate,
                is_available: available,
                image_url,
            };
            let car: Car = spinner::run("Updating vehicle...", service.update(&id, &patch)).await?;
            success!("updated {}", car.label());
            print_car(0, &car);
        }
        VehicleCommand::Remove { id } => {
            spinner::run("Removing vehicle...", service.delete(&id)).await?;
            success!("removed vehicle {id}");
        }
    }
    Ok(())
}

fn print_car(idx: usize, car: &Car) {
    print::tree_head(idx, &car.label());
    print::as_tree_one_level(format::car_details(car));
}

fn print_cars(cars: &[Car], q: u8) {
    if cars.is_empty() {
        print::no_results();
        return;
    }

    for (idx, car) in cars.iter().enumerate() {
        match q {
            2 => print::print(&format!("{}\t{}\t{}", car.id, car.license_plate, car.label())),
            _ => print_car(idx, car),
        }
        if q < 2 && idx + 1 != cars.len() {
            mprint!();
        }
    }

    if q == 0 {
        let available: usize = cars.iter().filter(|c| c.is_available).count();
        let summary: String = format!(
            "{} vehicles, {} available",
            cars.len().to_string().bold().green(),
            available.to_string().bold().yellow()
        );
        print::summary(&summary);
    }
}
