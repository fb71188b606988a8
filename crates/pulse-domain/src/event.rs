//! Event module - one bilateral interaction between two actors

use crate::error::DomainError;
use crate::pair::PairKey;
use crate::week::Week;

/// Event class (CAMEO quad class)
///
/// Codes 1 and 2 are cooperative, 3 and 4 are conflictual. Any other code is
/// kept out of both buckets and only counts toward an event total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    /// Verbal cooperation (1)
    VerbalCooperation,
    /// Material cooperation (2)
    MaterialCooperation,
    /// Verbal conflict (3)
    VerbalConflict,
    /// Material conflict (4)
    MaterialConflict,
}

impl EventClass {
    /// Map a numeric quad class code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(EventClass::VerbalCooperation),
            2 => Some(EventClass::MaterialCooperation),
            3 => Some(EventClass::VerbalConflict),
            4 => Some(EventClass::MaterialConflict),
            _ => None,
        }
    }

    /// Numeric quad class code
    pub fn code(&self) -> u8 {
        match self {
            EventClass::VerbalCooperation => 1,
            EventClass::MaterialCooperation => 2,
            EventClass::VerbalConflict => 3,
            EventClass::MaterialConflict => 4,
        }
    }

    /// Classes 1 and 2
    pub fn is_cooperative(&self) -> bool {
        matches!(self, EventClass::VerbalCooperation | EventClass::MaterialCooperation)
    }

    /// Classes 3 and 4
    pub fn is_conflictual(&self) -> bool {
        matches!(self, EventClass::VerbalConflict | EventClass::MaterialConflict)
    }
}

/// One bilateral interaction as delivered by the row source
///
/// `goldstein` and `mentions` are optional so that "not reported" stays
/// distinguishable from zero. `date` is kept as received; it is resolved to
/// a [`Week`] during aggregation, where a malformed value fails the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event date, `YYYYMMDD` or `YYYY-MM-DD`
    pub date: String,

    /// First actor country code
    pub actor1: String,

    /// Second actor country code
    pub actor2: String,

    /// Goldstein scale score (-10 conflictual .. +10 cooperative)
    pub goldstein: Option<f64>,

    /// Quad class, if the code was recognised
    pub class: Option<EventClass>,

    /// Number of source mentions
    pub mentions: Option<u64>,

    /// Average document tone; carried through, not aggregated
    pub tone: Option<f64>,
}

impl Event {
    /// Create an event with no optional fields set
    pub fn new(date: impl Into<String>, actor1: impl Into<String>, actor2: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            actor1: actor1.into(),
            actor2: actor2.into(),
            goldstein: None,
            class: None,
            mentions: None,
            tone: None,
        }
    }

    /// Set the Goldstein score
    pub fn with_goldstein(mut self, goldstein: f64) -> Self {
        self.goldstein = Some(goldstein);
        self
    }

    /// Set the quad class from its numeric code
    pub fn with_class(mut self, code: i64) -> Self {
        self.class = EventClass::from_code(code);
        self
    }

    /// Set the mention count
    pub fn with_mentions(mut self, mentions: u64) -> Self {
        self.mentions = Some(mentions);
        self
    }

    /// Canonical pair this event belongs to
    pub fn pair(&self) -> PairKey {
        PairKey::new(self.actor1.as_str(), self.actor2.as_str())
    }

    /// Week this event falls in
    pub fn week(&self) -> Result<Week, DomainError> {
        Week::from_event_date(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_partition() {
        for code in 1..=4 {
            let class = EventClass::from_code(code).unwrap();
            assert_ne!(class.is_cooperative(), class.is_conflictual());
            assert_eq!(i64::from(class.code()), code);
        }
        assert!(EventClass::from_code(0).is_none());
        assert!(EventClass::from_code(5).is_none());
    }

    #[test]
    fn test_reversed_events_share_pair() {
        let a = Event::new("20240115", "USA", "CHN");
        let b = Event::new("20240115", "CHN", "USA");
        assert_eq!(a.pair(), b.pair());
        assert_eq!(a.week().unwrap(), b.week().unwrap());
    }

    #[test]
    fn test_optional_fields_default_absent() {
        let event = Event::new("20240115", "USA", "CHN").with_class(9);
        assert!(event.goldstein.is_none());
        assert!(event.mentions.is_none());
        assert!(event.class.is_none());
    }
}
