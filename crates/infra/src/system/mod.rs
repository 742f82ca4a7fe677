use chrono::{DateTime, LocalResult, TimeZone, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// The current instant as a utc datetime, derived from
    /// [`Self::get_timestamp_millis`] so that test impls only have to
    /// provide the timestamp
    fn get_utc_datetime(&self) -> DateTime<Utc> {
        let millis = self.get_timestamp_millis();
        let secs = millis.div_euclid(1000);
        let nanos = (millis.rem_euclid(1000) * 1_000_000) as u32;
        match Utc.timestamp_opt(secs, nanos) {
            LocalResult::Single(datetime) => datetime,
            _ => Utc::now(),
        }
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
