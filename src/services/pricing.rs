//! Price formulas for each activity.
//!
//! Amounts are worked in whole cents and only turned into dollars at the end,
//! so discounted totals come out exact.

const BOWLING_GAME_CENTS: u64 = 1500;
const BOWLING_CHILD_DISCOUNT_PERCENT: u64 = 30;
const BOWLING_GUESTS_PER_LANE: u64 = 6;

const DARTS_HOUR_LANE_CENTS: u64 = 2500;
const DARTS_HALF_HOUR_LANE_CENTS: u64 = 1500;

const SOFT_PLAY_CHILD_CENTS: u64 = 1200;
pub const SOFT_PLAY_SESSION_MINUTES: u32 = 120;

fn to_dollars(cents: u64) -> f64 {
    cents as f64 / 100.0
}

/// Per person per game, with children paying 30% less.
pub fn bowling_price(adults: u32, children: u32, games: u32) -> f64 {
    let guests = u64::from(adults) + u64::from(children);
    let games = u64::from(games);
    let full = BOWLING_GAME_CENTS.saturating_mul(games).saturating_mul(guests);
    let discount = (u64::from(children) * BOWLING_CHILD_DISCOUNT_PERCENT)
        .saturating_mul(BOWLING_GAME_CENTS)
        .saturating_mul(games)
        / 100;
    to_dollars(full.saturating_sub(discount))
}

pub fn bowling_lanes(adults: u32, children: u32) -> u32 {
    let lanes = (u64::from(adults) + u64::from(children)).div_ceil(BOWLING_GUESTS_PER_LANE);
    u32::try_from(lanes).unwrap_or(u32::MAX)
}

/// Per lane per session; a 60 minute session is the long rate, anything else the short one.
/// `addon_children` is the soft-play addon headcount when the addon is taken.
pub fn ar_darts_price(lanes: u32, duration_minutes: u32, addon_children: Option<u32>) -> f64 {
    let lane_rate = if duration_minutes == 60 {
        DARTS_HOUR_LANE_CENTS
    } else {
        DARTS_HALF_HOUR_LANE_CENTS
    };
    let lanes_cents = lane_rate * u64::from(lanes);
    let addon_cents = addon_children
        .map(|children| SOFT_PLAY_CHILD_CENTS * u64::from(children))
        .unwrap_or(0);
    to_dollars(lanes_cents + addon_cents)
}

pub fn soft_play_price(children: u32) -> f64 {
    to_dollars(SOFT_PLAY_CHILD_CENTS * u64::from(children))
}
