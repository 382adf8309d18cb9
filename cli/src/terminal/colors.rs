use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const MONEY: Color = Color::BrightYellow;
pub const IDENTIFIER: Color = Color::BrightBlack;
pub const DATE: Color = Color::Cyan;

pub const AVAILABLE: Color = Color::Green;
pub const RENTED: Color = Color::Yellow;

pub const STATUS_PENDING: Color = Color::Yellow;
pub const STATUS_CONFIRMED: Color = Color::Blue;
pub const STATUS_ACTIVE: Color = Color::Green;
pub const STATUS_COMPLETED: Color = Color::BrightBlack;
pub const STATUS_CANCELLED: Color = Color::Red;

pub const RATING: Color = Color::BrightYellow;
