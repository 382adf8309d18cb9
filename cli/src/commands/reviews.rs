use fleetdash_common::models::{Identity, Review, ReviewPatch};
use fleetdash_core::services::{ReviewRequest, ReviewService};

use crate::commands::{App, ReviewCommand};
use crate::terminal::{format, print, spinner};
use crate::{mprint, success};

fn title(review: &Review) -> String {
    review
        .cars
        .as_ref()
        .map(|car| car.label())
        .unwrap_or_else(|| review.car_id.clone())
}

fn print_review(idx: usize, review: &Review) {
    print::tree_head(idx, &title(review));
    print::as_tree_one_level(format::review_details(review));
}

pub async fn run(app: &App, cmd: ReviewCommand) -> anyhow::Result<()> {
    let identity: Identity = app.identity().await?;
    let service: ReviewService = ReviewService::new(&app.repos);
    let q: u8 = app.cfg.quiet;

    match cmd {
        ReviewCommand::List {
            car,
            customer,
            booking,
        } => {
            let reviews: Vec<Review> = match (car, customer, booking) {
                (Some(car), _, _) => spinner::run("Fetching reviews...", service.for_car(&car)).await?,
                (_, Some(user), _) => {
                    spinner::run("Fetching reviews...", service.for_user(&user)).await?
                }
                (_, _, Some(booking)) => {
                    vec![spinner::run("Fetching review...", service.for_booking(&booking)).await?]
                }
                (None, None, None) => spinner::run("Fetching reviews...", service.list()).await?,
            };

            print::header("reviews", q);
            if reviews.is_empty() {
                print::no_results();
                return Ok(());
            }
            for (idx, review) in reviews.iter().enumerate() {
                match q {
                    2 => print::print(&format!("{}\t{}\t{}", review.id, review.car_id, review.rating)),
                    _ => print_review(idx, review),
                }
                if q < 2 && idx + 1 != reviews.len() {
                    mprint!();
                }
            }
        }
        ReviewCommand::Show { id } => {
            let review: Review = spinner::run("Fetching review...", service.get(&id)).await?;
            print::header("review", q);
            print_review(0, &review);
        }
        ReviewCommand::Add {
            car,
            booking,
            rating,
            comment,
            customer,
        } => {
            let request = ReviewRequest {
                user_id: customer,
                car_id: car,
                booking_id: booking,
                rating,
                comment,
            };
            let review: Review =
                spinner::run("Posting review...", service.create(&identity, request)).await?;
            success!("review {} posted", review.id);
            print_review(0, &review);
        }
        ReviewCommand::Update {
            id,
            rating,
            comment,
        } => {
            let patch = ReviewPatch { rating, comment };
            let review: Review =
                spinner::run("Updating review...", service.update(&identity, &id, &patch)).await?;
            success!("review {} updated", review.id);
            print_review(0, &review);
        }
        ReviewCommand::Remove { id } => {
            spinner::run("Deleting review...", service.delete(&identity, &id)).await?;
            success!("review {id} deleted");
        }
    }
    Ok(())
}
