use std::fmt;

pub const INTERVAL_COUNT: usize = 6;

/// One of the six 15-minute buckets of a 90-minute match, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interval {
    Min0To15,
    Min16To30,
    Min31To45,
    Min46To60,
    Min61To75,
    Min76To90,
}

impl Interval {
    pub const ALL: [Interval; INTERVAL_COUNT] = [
        Interval::Min0To15,
        Interval::Min16To30,
        Interval::Min31To45,
        Interval::Min46To60,
        Interval::Min61To75,
        Interval::Min76To90,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Interval::Min0To15 => "0-15",
            Interval::Min16To30 => "16-30",
            Interval::Min31To45 => "31-45",
            Interval::Min46To60 => "46-60",
            Interval::Min61To75 => "61-75",
            Interval::Min76To90 => "76-90",
        }
    }

    /// Key used by the fixture provider inside `statistics.goals`.
    pub fn provider_key(self) -> &'static str {
        match self {
            Interval::Min0To15 => "0'-15'",
            Interval::Min16To30 => "16'-30'",
            Interval::Min31To45 => "31'-45'",
            Interval::Min46To60 => "46'-60'",
            Interval::Min61To75 => "61'-75'",
            Interval::Min76To90 => "76'-90'",
        }
    }

    /// Maps a provider key onto an interval. Both `0'-15'` and `0-15` are accepted;
    /// anything else (extra time buckets included) is not an interval.
    pub fn from_key(key: &str) -> Option<Interval> {
        let key = key.trim();
        Interval::ALL
            .into_iter()
            .find(|i| i.provider_key() == key || i.label() == key)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_index() {
        for (idx, interval) in Interval::ALL.iter().enumerate() {
            assert_eq!(interval.index(), idx);
        }
    }

    #[test]
    fn keys_resolve_in_both_spellings() {
        assert_eq!(Interval::from_key("0'-15'"), Some(Interval::Min0To15));
        assert_eq!(Interval::from_key("76-90"), Some(Interval::Min76To90));
        assert_eq!(Interval::from_key("91'-105'"), None);
        assert_eq!(Interval::from_key(""), None);
    }
}
