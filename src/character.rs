// Import necessary modules from external crates.
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::{
    console::{Console, Tone},
    error::{AppError, CharacterError, Result},
    menu::{Menu, Selection},
    special::Special,
};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

// Stored under the lowercase variant name, shown with the caption below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    American,
    Europeoid,
    Asian,
    Buryat,
    Kazakh,
    Slav,
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Race::American => write!(f, "African American"),
            Race::Europeoid => write!(f, "Caucasian"),
            Race::Asian => write!(f, "Asian"),
            Race::Buryat => write!(f, "Buryat"),
            Race::Kazakh => write!(f, "Kazakh"),
            Race::Slav => write!(f, "Slav"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basics {
    pub name: String,
    pub gender: Gender,
    pub race: Race,
}

impl Basics {
    pub fn new(name: &str, gender: Gender, race: Race) -> std::result::Result<Self, CharacterError> {
        Ok(Self {
            name: validate_name(name)?,
            gender,
            race,
        })
    }
}

// Skills, traits, perks and inventory are not modelled yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub basic: Basics,
    pub special: Special,
}

impl Character {
    pub fn new(basic: Basics, special: Special) -> Self {
        Self { basic, special }
    }

    pub fn name(&self) -> &str {
        &self.basic.name
    }

    // One-screen summary printed after loading.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Name: {}", self.basic.name),
            format!("Gender: {}", self.basic.gender),
            format!("Race: {}", self.basic.race),
        ];
        lines.extend(
            self.special
                .snapshot()
                .into_iter()
                .map(|(stat, value)| format!("  {} = {}", stat.key().to_uppercase(), value)),
        );
        lines
    }
}

/// Latin letters only, 3 to 15 of them. Returns the name capitalized.
pub fn validate_name(name: &str) -> std::result::Result<String, CharacterError> {
    let valid = name.chars().all(|c| c.is_ascii_alphabetic())
        && (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.len());
    if !valid {
        return Err(CharacterError::InvalidName(name.to_string()));
    }
    Ok(capitalize(name))
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// region:  --- Prompts

pub fn choose_gender<C: Console>(console: &mut C) -> Result<Gender> {
    choose("Your gender", console)
}

pub fn choose_race<C: Console>(console: &mut C) -> Result<Race> {
    choose("Your race", console)
}

fn choose<T, C>(title: &str, console: &mut C) -> Result<T>
where
    T: IntoEnumIterator + fmt::Display,
    C: Console,
{
    let options: Vec<T> = T::iter().collect();
    let menu = Menu::builder(title)
        .choices(options.iter().map(ToString::to_string))
        .build();
    let selected = loop {
        // No back entry, so only a choice can come out of the menu.
        if let Selection::Choice(index) = menu.show(console)? {
            break index;
        }
    };
    options
        .into_iter()
        .nth(selected)
        .ok_or_else(|| CharacterError::InvalidChoice(selected).into())
}

pub fn ask_name<C: Console>(console: &mut C) -> Result<String> {
    let prompt = "Enter your name: ";
    console.print(prompt)?;
    loop {
        let Some(answer) = console.read_line()? else {
            return Err(AppError::InputClosed);
        };
        if answer.is_empty() {
            continue;
        }
        match validate_name(&answer) {
            Ok(name) => return Ok(name),
            Err(e) => {
                console.say(&e.to_string(), Tone::Error)?;
                console.print(prompt)?;
            }
        }
    }
}

// endregion:  --- Prompts
