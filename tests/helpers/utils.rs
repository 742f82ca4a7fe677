use chrono::DateTime;
use chrono_tz::Tz;

pub fn format_date(dt: &DateTime<Tz>) -> String {
    // https://docs.rs/chrono/0.4.19/chrono/format/strftime/index.html
    // 2001-07-08
    dt.format("%F").to_string()
}
