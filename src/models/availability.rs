use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotAvailability {
    pub time: String,
    pub available: bool,
}

/// Range of start hours an activity accepts, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHours {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl SlotHours {
    pub const ALL_DAY: SlotHours = SlotHours {
        first_hour: 10,
        last_hour: 22,
    };

    pub fn contains(&self, time: &str) -> bool {
        match parse_time(time) {
            Ok((hour, _)) => hour >= self.first_hour && hour <= self.last_hour,
            Err(_) => false,
        }
    }
}

pub fn parse_time(s: &str) -> anyhow::Result<(u32, u32)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 || parts[0].len() != 2 || parts[1].len() != 2 {
        return Err(anyhow::anyhow!("invalid time format: {s}"));
    }
    let hour: u32 = parts[0]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid hour in: {s}"))?;
    let minute: u32 = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid minute in: {s}"))?;
    if hour > 23 || minute > 59 {
        return Err(anyhow::anyhow!("time out of range: {s}"));
    }
    Ok((hour, minute))
}

pub fn format_time(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}
