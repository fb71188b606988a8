//! Weekly stat calculator

use pulse_domain::{Event, WeeklyStat};

/// Round to two decimal places, ties to even
///
/// Negative zero comes out as `0.0` so it orders equal to zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0 + 0.0
}

/// Arithmetic mean, `None` for an empty input
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Reduce the events of one (pair, week) to a [`WeeklyStat`]
///
/// The average only covers events that carry a Goldstein score and stays
/// `None` when none does. Missing mention counts add nothing.
///
/// # Examples
///
/// ```
/// use pulse_aggregate::weekly_stat;
/// use pulse_domain::Event;
///
/// let events = vec![
///     Event::new("20240115", "USA", "CHN").with_goldstein(-5.0).with_class(4).with_mentions(10),
///     Event::new("20240116", "CHN", "USA").with_goldstein(3.0).with_class(1).with_mentions(5),
/// ];
/// let stat = weekly_stat(&events);
/// assert_eq!(stat.total, 2);
/// assert_eq!(stat.avg_goldstein, Some(-1.0));
/// ```
pub fn weekly_stat<'a, I>(events: I) -> WeeklyStat
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut stat = WeeklyStat::placeholder();
    let mut scored = Vec::new();

    for event in events {
        stat.total += 1;
        stat.mentions += event.mentions.unwrap_or(0);

        if let Some(class) = event.class {
            if class.is_cooperative() {
                stat.coop += 1;
            } else if class.is_conflictual() {
                stat.conf += 1;
            }
        }
        if let Some(score) = event.goldstein {
            scored.push(score);
        }
    }

    stat.avg_goldstein = mean(scored).map(round2);
    stat
}
