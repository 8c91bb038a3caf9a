use crate::db::placement::PlacementRecord;
use std::time::{Duration, UNIX_EPOCH};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

pub fn format_taken_at(timestamp: u64) -> String {
    let taken = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Local> = taken.into();

    let today = chrono::Local::now().date_naive();
    let taken_date = datetime.date_naive();

    if taken_date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if taken_date == today - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

pub fn format_history_item(record: &PlacementRecord) -> String {
    format!(
        "{} - {}/{} ({}%) {}",
        format_taken_at(record.taken_at),
        record.correct,
        record.total,
        record.percentage,
        record.recommendation
    )
}
