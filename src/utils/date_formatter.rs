use chrono::{DateTime, Utc};

/// Whole years of a fractional age.
pub fn age_years(age: f64) -> u32 {
    age.max(0.0).floor() as u32
}

/// Whole months past the last birthday of a fractional age.
pub fn age_months(age: f64) -> u32 {
    let age = age.max(0.0);
    (((age - age.floor()) * 12.0).floor() as u32).min(11)
}

/// Formats a fractional age as `"5y 8m"`.
pub fn format_age(age: f64) -> String {
    format!("{}y {}m", age_years(age), age_months(age))
}

/// Month label for the time axis, e.g. `"Jan 2024"`.
pub fn format_month_year(time: DateTime<Utc>) -> String {
    time.format("%b %Y").to_string()
}
