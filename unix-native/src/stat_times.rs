use std::time::Duration;
use std::time::SystemTime;

/// Selects one of the three timestamps in a `struct stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatTimes {
    /// `st_atime`
    Access,
    /// `st_mtime`
    Modify,
    /// `st_ctime`
    StatusChange,
}

/// Whole seconds since the epoch plus the nanosecond remainder, exactly as
/// stored in the stat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatTimestamp {
    pub seconds: i64,
    pub nanos: i64,
}

impl StatTimestamp {
    /// Returns `None` when the nanosecond field is outside `0..1_000_000_000`
    /// or the value does not fit in a `SystemTime`.
    pub fn to_system_time(self) -> Option<SystemTime> {
        let nanos = u32::try_from(self.nanos)
            .ok()
            .filter(|nanos| *nanos < 1_000_000_000)?;
        let whole = Duration::from_secs(self.seconds.unsigned_abs());
        let at_second = if self.seconds >= 0 {
            SystemTime::UNIX_EPOCH.checked_add(whole)?
        } else {
            SystemTime::UNIX_EPOCH.checked_sub(whole)?
        };
        at_second.checked_add(Duration::from_nanos(u64::from(nanos)))
    }
}

pub fn stat_seconds(statbuf: &libc::stat, kind: StatTimes) -> i64 {
    match kind {
        StatTimes::Access => statbuf.st_atime as i64,
        StatTimes::Modify => statbuf.st_mtime as i64,
        StatTimes::StatusChange => statbuf.st_ctime as i64,
    }
}

pub fn stat_nanoseconds(statbuf: &libc::stat, kind: StatTimes) -> i64 {
    match kind {
        StatTimes::Access => statbuf.st_atime_nsec as i64,
        StatTimes::Modify => statbuf.st_mtime_nsec as i64,
        StatTimes::StatusChange => statbuf.st_ctime_nsec as i64,
    }
}

pub fn stat_timestamp(statbuf: &libc::stat, kind: StatTimes) -> StatTimestamp {
    StatTimestamp {
        seconds: stat_seconds(statbuf, kind),
        nanos: stat_nanoseconds(statbuf, kind),
    }
}
