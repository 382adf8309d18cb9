use chrono::{DateTime, Utc};
use colored::*;
use fleetdash_common::models::{Booking, BookingStatus, Car, Profile, Review};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

/// `$12,345.60`
pub fn money_text(amount: f64) -> String {
    let cents: i64 = (amount.abs() * 100.0).round() as i64;
    let whole: String = (cents / 100).to_string();

    let mut grouped: String = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign: &str = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

pub fn money(amount: f64) -> ColoredString {
    money_text(amount).color(colors::MONEY)
}

pub fn date(at: &DateTime<Utc>) -> ColoredString {
    at.format("%Y-%m-%d").to_string().color(colors::DATE)
}

pub fn date_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> ColoredString {
    format!("{} → {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")).color(colors::DATE)
}

pub fn percent(value: f64) -> ColoredString {
    format!("{value:.1}%").bold()
}

pub fn status(status: BookingStatus) -> ColoredString {
    let color = match status {
        BookingStatus::Pending => colors::STATUS_PENDING,
        BookingStatus::Confirmed => colors::STATUS_CONFIRMED,
        BookingStatus::Active => colors::STATUS_ACTIVE,
        BookingStatus::Completed => colors::STATUS_COMPLETED,
        BookingStatus::Cancelled => colors::STATUS_CANCELLED,
    };
    status.as_str().color(color)
}

pub fn availability(is_available: bool) -> ColoredString {
    match is_available {
        true => "available".color(colors::AVAILABLE),
        false => "rented".color(colors::RENTED),
    }
}

/// `★★★★☆`, clamped to five stars.
pub fn stars(rating: i32) -> ColoredString {
    let filled: usize = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)).color(colors::RATING)
}

pub fn id(id: &str) -> ColoredString {
    id.color(colors::IDENTIFIER)
}

fn or_dash(value: Option<&str>) -> ColoredString {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => v.normal(),
        None => "-".dimmed(),
    }
}

pub fn car_details(car: &Car) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Id", id(&car.id)),
        detail("Plate", car.license_plate.bold()),
        detail("Rate", format!("{} / day", money_text(car.daily_rate)).color(colors::MONEY)),
        detail("Status", availability(car.is_available)),
    ];
    if let Some(url) = &car.image_url {
        details.push(detail("Image", url.normal()));
    }
    details.push(detail("Added", date(&car.created_at)));
    details
}

pub fn booking_details(booking: &Booking) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Id", id(&booking.id)),
        detail("Status", status(booking.status)),
        detail("Car", booking.car_label().normal()),
    ];
    if booking.profiles.is_some() {
        details.push(detail("Customer", booking.customer_name().normal()));
    }
    details.push(detail("Dates", date_range(&booking.start_date, &booking.end_date)));
    details.push(detail(
        "Total",
        booking.total_amount.map(money).unwrap_or_else(|| "-".dimmed()),
    ));
    details
}

pub fn profile_details(profile: &Profile) -> Vec<Detail> {
    let role: ColoredString = match profile.is_admin {
        true => "admin".bright_magenta(),
        false => "customer".normal(),
    };
    vec![
        detail("Id", id(&profile.id)),
        detail("Phone", or_dash(profile.phone_number.as_deref())),
        detail("Role", role),
        detail("Joined", date(&profile.created_at)),
    ]
}

pub fn review_details(review: &Review) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Id", id(&review.id)),
        detail("Rating", stars(review.rating)),
    ];
    if let Some(car) = &review.cars {
        details.push(detail("Car", car.label().normal()));
    }
    if let Some(author) = &review.profiles {
        details.push(detail("Author", or_dash(Some(&author.full_name()))));
    }
    if let Some(period) = &review.bookings {
        details.push(detail("Rental", date_range(&period.start_date, &period.end_date)));
    }
    details.push(detail("Comment", or_dash(review.comment.as_deref())));
    details.push(detail("Posted", date(&review.created_at)));
    details
}
