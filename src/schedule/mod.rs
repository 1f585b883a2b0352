//! Schedule presentation logic: day-to-date mapping, row normalization,
//! faceted filtering, and calendar grouping. All pure functions over the
//! normalized match list.

mod calendar;
mod filter;
mod grouping;
mod normalize;

pub use calendar::{format_date, map_day_to_date};
pub use filter::{apply_filter, distinct_days, distinct_referees, distinct_teams};
pub use grouping::group_by_date;
pub use normalize::{convert_field, normalize_rows, split_matchup};
