// /special.rs

// The seven SPECIAL attributes and the validated set that holds them.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

pub const MIN_STAT: i32 = 1;
pub const MAX_STAT: i32 = 10;
pub const BASELINE_STAT: u8 = 5;

// Declaration order is the canonical display and serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum SpecialStat {
    Strength,
    Perception,
    Endurance,
    Charisma,
    Intelligence,
    Agility,
    Luck,
}

impl SpecialStat {
    /// Lowercase one-letter key used in commands and save files.
    pub fn key(self) -> &'static str {
        match self {
            SpecialStat::Strength => "s",
            SpecialStat::Perception => "p",
            SpecialStat::Endurance => "e",
            SpecialStat::Charisma => "c",
            SpecialStat::Intelligence => "i",
            SpecialStat::Agility => "a",
            SpecialStat::Luck => "l",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialStat::Strength => "Strength",
            SpecialStat::Perception => "Perception",
            SpecialStat::Endurance => "Endurance",
            SpecialStat::Charisma => "Charisma",
            SpecialStat::Intelligence => "Intelligence",
            SpecialStat::Agility => "Agility",
            SpecialStat::Luck => "Luck",
        }
    }

    pub fn localized_name(self) -> &'static str {
        match self {
            SpecialStat::Strength => "сила",
            SpecialStat::Perception => "восприятие",
            SpecialStat::Endurance => "выносливость",
            SpecialStat::Charisma => "харизма",
            SpecialStat::Intelligence => "интеллект",
            SpecialStat::Agility => "ловкость",
            SpecialStat::Luck => "удача",
        }
    }

    // Only the one-letter key, case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::iter().find(|stat| stat.key().eq_ignore_ascii_case(key.trim()))
    }

    // Key, English name or localized name.
    pub fn from_topic(topic: &str) -> Option<Self> {
        let topic = topic.trim().to_lowercase();
        Self::iter().find(|stat| {
            stat.key() == topic || stat.name().to_lowercase() == topic || stat.localized_name() == topic
        })
    }
}

impl fmt::Display for SpecialStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.key().to_uppercase())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecialError {
    #[error("Missing SPECIAL stat(s): {}", join_keys(.0))]
    MissingKey(Vec<SpecialStat>), // Construction without all seven keys.

    #[error("Unknown SPECIAL stat - {0}")]
    UnknownKey(String),

    #[error("SPECIAL stat {0} given more than once")]
    DuplicateKey(SpecialStat),

    #[error("{stat} must be between 1 and 10, got {value}")]
    OutOfRange { stat: SpecialStat, value: i32 },

    #[error("{0} is already 10 and cannot be raised")]
    AtUpperBound(SpecialStat),

    #[error("{0} is already 1 and cannot be lowered")]
    AtLowerBound(SpecialStat),
}

fn join_keys(stats: &[SpecialStat]) -> String {
    stats.iter().map(|stat| stat.key()).collect::<Vec<_>>().join(", ")
}

/// A complete set of SPECIAL values, every one of them in `1..=10`.
///
/// The fields are private so the only way to change a value is through
/// [`Special::set`], [`Special::increment`] and [`Special::decrement`].
/// Deserialization goes through [`Special::from_map`], so a loaded save can
/// never hold a missing or out-of-range stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, i32>")]
pub struct Special {
    #[serde(rename = "s")]
    strength: u8,
    #[serde(rename = "p")]
    perception: u8,
    #[serde(rename = "e")]
    endurance: u8,
    #[serde(rename = "c")]
    charisma: u8,
    #[serde(rename = "i")]
    intelligence: u8,
    #[serde(rename = "a")]
    agility: u8,
    #[serde(rename = "l")]
    luck: u8,
}

impl Default for Special {
    fn default() -> Self {
        Self::uniform(BASELINE_STAT)
    }
}

impl Special {
    fn uniform(value: u8) -> Self {
        Special {
            strength: value,
            perception: value,
            endurance: value,
            charisma: value,
            intelligence: value,
            agility: value,
            luck: value,
        }
    }

    /// Builds a set from a key/value mapping that must name all seven stats.
    ///
    /// Keys are matched case-insensitively and may appear only once. Every
    /// value goes through the same range check as [`Special::set`].
    pub fn from_map<K, I>(values: I) -> Result<Self, SpecialError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, i32)>,
    {
        let mut given: HashMap<SpecialStat, i32> = HashMap::new();
        for (key, value) in values {
            let stat = SpecialStat::from_key(key.as_ref())
                .ok_or_else(|| SpecialError::UnknownKey(key.as_ref().to_lowercase()))?;
            if given.insert(stat, value).is_some() {
                return Err(SpecialError::DuplicateKey(stat));
            }
        }

        let missing: Vec<SpecialStat> = SpecialStat::iter()
            .filter(|stat| !given.contains_key(stat))
            .collect();
        if !missing.is_empty() {
            return Err(SpecialError::MissingKey(missing));
        }

        // Canonical order, so the first bad stat reported is always the same one.
        let mut special = Self::default();
        for stat in SpecialStat::iter() {
            if let Some(&value) = given.get(&stat) {
                special.set(stat, value)?;
            }
        }
        Ok(special)
    }

    pub fn get(&self, stat: SpecialStat) -> u8 {
        match stat {
            SpecialStat::Strength => self.strength,
            SpecialStat::Perception => self.perception,
            SpecialStat::Endurance => self.endurance,
            SpecialStat::Charisma => self.charisma,
            SpecialStat::Intelligence => self.intelligence,
            SpecialStat::Agility => self.agility,
            SpecialStat::Luck => self.luck,
        }
    }

    // String-keyed lookup for callers that still hold raw keys.
    pub fn get_by_key(&self, key: &str) -> Result<u8, SpecialError> {
        SpecialStat::from_key(key)
            .map(|stat| self.get(stat))
            .ok_or_else(|| SpecialError::UnknownKey(key.to_lowercase()))
    }

    pub fn set(&mut self, stat: SpecialStat, value: i32) -> Result<(), SpecialError> {
        let value = Self::validate(stat, value)?;
        *self.slot_mut(stat) = value;
        Ok(())
    }

    pub fn set_by_key(&mut self, key: &str, value: i32) -> Result<(), SpecialError> {
        let stat = SpecialStat::from_key(key)
            .ok_or_else(|| SpecialError::UnknownKey(key.to_lowercase()))?;
        self.set(stat, value)
    }

    pub fn increment(&mut self, stat: SpecialStat) -> Result<(), SpecialError> {
        let slot = self.slot_mut(stat);
        if i32::from(*slot) >= MAX_STAT {
            return Err(SpecialError::AtUpperBound(stat));
        }
        *slot += 1;
        Ok(())
    }

    pub fn decrement(&mut self, stat: SpecialStat) -> Result<(), SpecialError> {
        let slot = self.slot_mut(stat);
        if i32::from(*slot) <= MIN_STAT {
            return Err(SpecialError::AtLowerBound(stat));
        }
        *slot -= 1;
        Ok(())
    }

    /// Read-only copy in canonical `s, p, e, c, i, a, l` order.
    pub fn snapshot(&self) -> Vec<(SpecialStat, u8)> {
        SpecialStat::iter().map(|stat| (stat, self.get(stat))).collect()
    }

    pub fn total(&self) -> i32 {
        SpecialStat::iter().map(|stat| i32::from(self.get(stat))).sum()
    }

    /// Range check shared by construction and assignment.
    pub fn validate(stat: SpecialStat, value: i32) -> Result<u8, SpecialError> {
        if !(MIN_STAT..=MAX_STAT).contains(&value) {
            return Err(SpecialError::OutOfRange { stat, value });
        }
        // In range, so the narrowing is lossless.
        Ok(value as u8)
    }

    fn slot_mut(&mut self, stat: SpecialStat) -> &mut u8 {
        match stat {
            SpecialStat::Strength => &mut self.strength,
            SpecialStat::Perception => &mut self.perception,
            SpecialStat::Endurance => &mut self.endurance,
            SpecialStat::Charisma => &mut self.charisma,
            SpecialStat::Intelligence => &mut self.intelligence,
            SpecialStat::Agility => &mut self.agility,
            SpecialStat::Luck => &mut self.luck,
        }
    }
}

impl TryFrom<HashMap<String, i32>> for Special {
    type Error = SpecialError;

    fn try_from(values: HashMap<String, i32>) -> Result<Self, Self::Error> {
        Special::from_map(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map(value: i32) -> Vec<(&'static str, i32)> {
        SpecialStat::iter().map(|stat| (stat.key(), value)).collect()
    }

    #[test]
    fn set_then_get_for_every_stat_and_value() {
        let mut special = Special::default();
        for stat in SpecialStat::iter() {
            for value in MIN_STAT..=MAX_STAT {
                special.set(stat, value).unwrap();
                assert_eq!(i32::from(special.get(stat)), value);
            }
        }
    }

    #[test]
    fn out_of_range_set_keeps_previous_value() {
        let mut special = Special::default();
        for value in [-3, 0, 11, 100] {
            let err = special.set(SpecialStat::Luck, value).unwrap_err();
            assert_eq!(
                err,
                SpecialError::OutOfRange {
                    stat: SpecialStat::Luck,
                    value
                }
            );
            assert_eq!(special.get(SpecialStat::Luck), BASELINE_STAT);
        }
    }

    #[test]
    fn increment_and_decrement_cancel_out() {
        let mut special = Special::default();
        special.increment(SpecialStat::Agility).unwrap();
        special.decrement(SpecialStat::Agility).unwrap();
        assert_eq!(special.get(SpecialStat::Agility), BASELINE_STAT);

        special.decrement(SpecialStat::Charisma).unwrap();
        special.increment(SpecialStat::Charisma).unwrap();
        assert_eq!(special.get(SpecialStat::Charisma), BASELINE_STAT);
    }

    #[test]
    fn bounds_reject_increment_and_decrement() {
        let mut special = Special::default();
        special.set(SpecialStat::Strength, 10).unwrap();
        special.set(SpecialStat::Endurance, 1).unwrap();

        assert_eq!(
            special.increment(SpecialStat::Strength),
            Err(SpecialError::AtUpperBound(SpecialStat::Strength))
        );
        assert_eq!(
            special.decrement(SpecialStat::Endurance),
            Err(SpecialError::AtLowerBound(SpecialStat::Endurance))
        );
        assert_eq!(special.get(SpecialStat::Strength), 10);
        assert_eq!(special.get(SpecialStat::Endurance), 1);
    }

    #[test]
    fn construction_rejects_duplicate_keys() {
        let mut values = full_map(5);
        values.push(("S", 9));
        assert_eq!(
            Special::from_map(values),
            Err(SpecialError::DuplicateKey(SpecialStat::Strength))
        );
    }

    #[test]
    fn construction_reports_first_bad_stat_in_canonical_order() {
        let values = vec![("l", 0), ("a", 5), ("i", 5), ("c", 5), ("e", 5), ("p", 12), ("s", 5)];
        assert_eq!(
            Special::from_map(values),
            Err(SpecialError::OutOfRange {
                stat: SpecialStat::Perception,
                value: 12
            })
        );
    }

    #[test]
    fn construction_requires_every_key() {
        let partial = vec![("s", 5), ("p", 5), ("e", 5), ("c", 5), ("i", 5)];
        assert_eq!(
            Special::from_map(partial),
            Err(SpecialError::MissingKey(vec![
                SpecialStat::Agility,
                SpecialStat::Luck
            ]))
        );
    }

    #[test]
    fn construction_validates_values_and_keys() {
        let mut values = full_map(5);
        values[3].1 = 11;
        assert!(matches!(
            Special::from_map(values),
            Err(SpecialError::OutOfRange {
                stat: SpecialStat::Charisma,
                value: 11
            })
        ));

        let mut values = full_map(5);
        values.push(("x", 5));
        assert_eq!(
            Special::from_map(values),
            Err(SpecialError::UnknownKey("x".to_string()))
        );
    }

    #[test]
    fn keys_are_case_insensitive() {
        let values = vec![
            ("S", 8),
            ("P", 1),
            ("e", 5),
            ("C", 6),
            ("i", 5),
            ("A", 5),
            ("l", 10),
        ];
        let special = Special::from_map(values).unwrap();
        assert_eq!(special.get_by_key("s"), Ok(8));
        assert_eq!(special.get_by_key("L"), Ok(10));
        assert_eq!(
            special.get_by_key("q"),
            Err(SpecialError::UnknownKey("q".to_string()))
        );
    }

    #[test]
    fn snapshot_is_in_canonical_order() {
        let keys: Vec<&str> = Special::default()
            .snapshot()
            .into_iter()
            .map(|(stat, _)| stat.key())
            .collect();
        assert_eq!(keys, vec!["s", "p", "e", "c", "i", "a", "l"]);
    }

    #[test]
    fn serializes_as_ordered_lowercase_keys() {
        let mut special = Special::default();
        special.set(SpecialStat::Strength, 8).unwrap();
        let json = serde_json::to_string(&special).unwrap();
        assert_eq!(json, r#"{"s":8,"p":5,"e":5,"c":5,"i":5,"a":5,"l":5}"#);
    }

    #[test]
    fn deserialization_rejects_invalid_sets() {
        assert!(serde_json::from_str::<Special>(r#"{"s":8,"p":5}"#).is_err());
        assert!(
            serde_json::from_str::<Special>(r#"{"s":0,"p":5,"e":5,"c":5,"i":5,"a":5,"l":5}"#)
                .is_err()
        );
        let special: Special =
            serde_json::from_str(r#"{"s":8,"p":1,"e":5,"c":6,"i":5,"a":5,"l":10}"#).unwrap();
        assert_eq!(special.get(SpecialStat::Luck), 10);
    }

    #[test]
    fn topics_match_names_in_both_languages() {
        assert_eq!(SpecialStat::from_topic("p"), Some(SpecialStat::Perception));
        assert_eq!(
            SpecialStat::from_topic("Perception"),
            Some(SpecialStat::Perception)
        );
        assert_eq!(
            SpecialStat::from_topic("выносливость"),
            Some(SpecialStat::Endurance)
        );
        assert_eq!(SpecialStat::from_topic("stamina"), None);
        // Assignment keys only accept the letter.
        assert_eq!(SpecialStat::from_key("strength"), None);
    }
}
