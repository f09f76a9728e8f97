//! Fixed sheet layout.

/// Header row, written once at creation and never altered.
pub const COLUMNS: [&str; 8] = [
    "Submission Time",
    "UserName",
    "Email",
    "Employee ID",
    "Tower",
    "Problem",
    "Business Benefit",
    "Justification/UseCase",
];

pub const DEFAULT_SHEET_NAME: &str = "AI Solutions Requests";

pub const DEFAULT_COLUMN_WIDTH: f64 = 15.0;

/// Header background (light grey).
pub const HEADER_FILL_RGB: u32 = 0xCCCCCC;
