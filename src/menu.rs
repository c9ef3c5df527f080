// /menu.rs

// Small numbered menus for the line console.
//
//     let selection = Menu::builder("Main menu")
//         .choice("New game") // 1
//         .choice("Exit") // 2
//         .back_choice(true) // b
//         .build()
//         .show(&mut console)?;
//
// The caller matches on the returned `Selection` instead of attaching
// callbacks to each entry.
use crate::{
    console::{Console, Tone},
    error::Result,
};

pub const BACK_COMMAND: &str = "b";
pub const INVALID_INPUT: &str = "Invalid input. Enter one of the menu commands.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Choice(usize), // Index in insertion order, starting at 0.
    Back,
}

#[derive(Debug, Clone)]
struct MenuChoice {
    command: String,
    caption: String,
}

#[derive(Debug, Clone)]
pub struct Menu {
    title: String,
    choices: Vec<MenuChoice>,
    back_choice: bool,
}

impl Menu {
    pub fn builder(title: impl Into<String>) -> MenuBuilder {
        MenuBuilder::new(title)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Matches one answer against the menu commands, ignoring case.
    pub fn select(&self, answer: &str) -> Option<Selection> {
        let answer = answer.trim().to_lowercase();
        if self.back_choice && answer == BACK_COMMAND {
            return Some(Selection::Back);
        }
        self.choices
            .iter()
            .position(|choice| choice.command == answer)
            .map(Selection::Choice)
    }

    /// Prints the menu and keeps asking until the answer names a choice.
    pub fn show<C: Console>(&self, console: &mut C) -> Result<Selection> {
        loop {
            self.render(console)?;
            let answer = console.prompt("> ")?;
            if let Some(selection) = self.select(&answer) {
                return Ok(selection);
            }
            console.error(INVALID_INPUT)?;
        }
    }

    fn render<C: Console>(&self, console: &mut C) -> std::io::Result<()> {
        console.say(&format!("{}:", self.title), Tone::Title)?;
        for choice in &self.choices {
            console.println(&format!("\t{} - {}", choice.caption, choice.command))?;
        }
        if self.back_choice {
            console.println(&format!("\tBack - {BACK_COMMAND}"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MenuBuilder {
    title: String,
    choices: Vec<MenuChoice>,
    back_choice: bool,
    next_index: usize,
}

impl MenuBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            choices: Vec::new(),
            back_choice: false,
            next_index: 0,
        }
    }

    // Numbered entry: the command is the next number.
    pub fn choice(mut self, caption: impl Into<String>) -> Self {
        self.next_index += 1;
        let command = self.next_index.to_string();
        self.push(command, caption.into());
        self
    }

    // Entry answered by an explicit command such as `help`.
    pub fn keyed_choice(mut self, command: impl Into<String>, caption: impl Into<String>) -> Self {
        self.next_index += 1;
        let command = command.into().to_lowercase();
        self.push(command, caption.into());
        self
    }

    pub fn choices<I, S>(self, captions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        captions.into_iter().fold(self, |builder, caption| builder.choice(caption))
    }

    pub fn back_choice(mut self, show: bool) -> Self {
        self.back_choice = show;
        self
    }

    pub fn build(self) -> Menu {
        Menu {
            title: self.title,
            choices: self.choices,
            back_choice: self.back_choice,
        }
    }

    pub fn show<C: Console>(self, console: &mut C) -> Result<Selection> {
        self.build().show(console)
    }

    fn push(&mut self, command: String, caption: String) {
        // A repeated command replaces the caption in place.
        match self.choices.iter_mut().find(|choice| choice.command == command) {
            Some(existing) => existing.caption = caption,
            None => self.choices.push(MenuChoice { command, caption }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{console::LineConsole, error::AppError};
    use std::io::Cursor;

    #[test]
    fn numbers_choices_from_one() {
        let menu = Menu::builder("Your gender").choice("Male").choice("Female").build();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.select("1"), Some(Selection::Choice(0)));
        assert_eq!(menu.select(" 2 "), Some(Selection::Choice(1)));
        assert_eq!(menu.select("3"), None);
        assert_eq!(menu.select("b"), None);
    }

    #[test]
    fn keyed_choices_and_back_ignore_case() {
        let menu = Menu::builder("Enter command")
            .keyed_choice("help", "Help")
            .choice("About")
            .back_choice(true)
            .build();
        assert_eq!(menu.select("HELP"), Some(Selection::Choice(0)));
        assert_eq!(menu.select("2"), Some(Selection::Choice(1)));
        assert_eq!(menu.select("B"), Some(Selection::Back));
    }

    #[test]
    fn show_repeats_until_valid() {
        let mut console = LineConsole::new(Cursor::new("7\nfoo\n2\n"), Vec::new(), false);
        let selection = Menu::builder("Pick a save")
            .choices(["Bob_1", "Bob_2"])
            .back_choice(true)
            .show(&mut console)
            .unwrap();
        assert_eq!(selection, Selection::Choice(1));

        let output = String::from_utf8(console.into_writer()).unwrap();
        assert_eq!(output.matches("Pick a save:").count(), 3);
        assert_eq!(output.matches(INVALID_INPUT).count(), 2);
        assert!(output.contains("\tBob_2 - 2\n\tBack - b\n"));
    }

    #[test]
    fn show_stops_when_input_ends() {
        let mut console = LineConsole::new(Cursor::new("9\n"), Vec::new(), false);
        let result = Menu::builder("Main menu").choice("Exit").show(&mut console);
        assert!(matches!(result, Err(AppError::InputClosed)));
    }
}
