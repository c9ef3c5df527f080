// ../tests/tests.rs
use postnuc::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

type ScriptedApp = App<LineConsole<Cursor<String>, Vec<u8>>>;

// Main menu without saves: 1 New game, 2 Settings, 3 About, 4 Exit.
// With saves: 1 New game, 2 Load game, 3 Settings, 4 About, 5 Exit.
const NEW_BOB: &str = "1\n1\nbob\n6\ns=8\np=1\nl=10\nc=6\nok\n";

fn settings_for(dir: &Path) -> Settings {
    Settings {
        save_dir: dir.join("saves"),
        color_output: false,
        debug_mode: false,
    }
}

fn run_script(dir: &Path, script: &str) -> (ScriptedApp, String) {
    let console = LineConsole::new(Cursor::new(script.to_string()), Vec::new(), false);
    let mut app = App::new(console, settings_for(dir), dir.join("settings.json"));
    app.run().expect("Expected the app to exit cleanly");
    let output = String::from_utf8(app.console().writer().clone()).expect("Expected UTF-8 output");
    (app, output)
}

#[test]
fn test_new_game_is_saved_and_loaded() {
    let dir = TempDir::new().unwrap();
    let script = format!("{NEW_BOB}2\n1\n5\n");
    let (app, output) = run_script(dir.path(), &script);

    // Step 1: the save file holds the envelope with the confirmed SPECIAL
    let json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("saves").join("Bob_1.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["save"]["savename"], "Bob_1");
    assert_eq!(json["character"]["basic"]["name"], "Bob");
    assert_eq!(json["character"]["basic"]["gender"], "male");
    assert_eq!(json["character"]["basic"]["race"], "slav");
    let special = &json["character"]["special"];
    for (key, value) in [("s", 8), ("p", 1), ("e", 5), ("c", 6), ("i", 5), ("a", 5), ("l", 10)] {
        assert_eq!(special[key], value, "stat {key}");
    }

    // Step 2: the load menu lists it and the summary is printed
    assert!(output.contains("Game saved as Bob_1"));
    assert!(output.contains("\tBob_1 - 1\n\tBack - b\n"));
    assert!(output.contains("Loaded Bob_1"));
    assert!(output.contains("Race: Slav"));
    assert!(output.ends_with("Bye.\n"));

    let loaded = app.current_save().expect("Expected a loaded save");
    assert_eq!(loaded.character.special.get(SpecialStat::Luck), 10);
    assert_eq!(loaded.character.basic.gender, Gender::Male);
}

#[test]
fn test_saved_special_rebuilds_identically() {
    let dir = TempDir::new().unwrap();
    let (app, _) = run_script(dir.path(), &format!("{NEW_BOB}5\n"));
    let saved = app.current_save().unwrap().character.special;

    let rebuilt = Special::from_map(
        saved
            .snapshot()
            .into_iter()
            .map(|(stat, value)| (stat.key(), i32::from(value))),
    )
    .unwrap();
    for (stat, value) in saved.snapshot() {
        assert_eq!(rebuilt.get(stat), value);
    }
}

#[test]
fn test_same_name_gets_next_save_number() {
    let dir = TempDir::new().unwrap();
    // The second game starts from the menu with saves, where New game is still 1.
    let script = format!("{NEW_BOB}{NEW_BOB}5\n");
    let (app, output) = run_script(dir.path(), &script);

    assert!(dir.path().join("saves").join("Bob_1.json").is_file());
    assert!(dir.path().join("saves").join("Bob_2.json").is_file());
    assert!(output.contains("Game saved as Bob_2"));
    assert_eq!(app.current_save().unwrap().save.savename, "Bob_2");
}

#[test]
fn test_point_buy_rejections_are_reported() {
    let dir = TempDir::new().unwrap();
    let script = "1\n2\njulia\n1\nok\nx=5\ns=abc\ns=11\ns=10\np=6\nhelp e\nhelp q\ns=7\nc=8\nok\n5\n";
    let (app, output) = run_script(dir.path(), script);

    assert!(output.contains("5 SPECIAL point(s) left to distribute"));
    assert!(output.contains("Unknown attribute - x"));
    assert!(output.contains("The attribute value is not a number: 'abc'"));
    assert!(output.contains("Strength(S) must be between 1 and 10, got 11"));
    assert!(output.contains("Not enough points for Perception(P): it costs 1, 0 left"));
    assert!(output.contains("Endurance(E) is the ability"));
    assert!(output.contains("Unknown option - q"));

    let game = app.current_save().unwrap();
    assert_eq!(game.save.savename, "Julia_1");
    assert_eq!(game.character.basic.gender, Gender::Female);
    assert_eq!(game.character.basic.race, Race::American);
    assert_eq!(game.character.special.get(SpecialStat::Strength), 7);
    assert_eq!(game.character.special.get(SpecialStat::Charisma), 8);
}

#[test]
fn test_input_ending_mid_session_exits_without_saving() {
    let dir = TempDir::new().unwrap();
    let (app, output) = run_script(dir.path(), "1\n1\nbob\n6\ns=8\n");

    assert!(app.current_save().is_none());
    assert!(!dir.path().join("saves").join("Bob_1.json").exists());
    assert!(output.ends_with("Bye.\n"));
}

#[test]
fn test_save_limit_asks_before_overwriting() {
    let dir = TempDir::new().unwrap();
    let saves = dir.path().join("saves");
    fs::create_dir_all(&saves).unwrap();
    for index in 1..=256 {
        fs::write(saves.join(format!("Bob_{index}.json")), "{}").unwrap();
    }

    // Refuse first, then accept on the second attempt.
    let script = format!("{NEW_BOB}maybe\nn\n{NEW_BOB}y\n5\n");
    let (app, output) = run_script(dir.path(), &script);

    assert_eq!(output.matches("Save limit reached for your name (Bob)!").count(), 2);
    assert!(output.contains("Returning to the main menu..."));
    assert!(output.contains("Overwriting the last save..."));
    assert_eq!(app.current_save().unwrap().save.savename, "Bob_256");

    let last = fs::read_to_string(saves.join("Bob_256.json")).unwrap();
    assert!(last.contains("\"savename\": \"Bob_256\""));
    assert_eq!(fs::read_to_string(saves.join("Bob_255.json")).unwrap(), "{}");
}

#[test]
fn test_corrupted_save_is_reported() {
    let dir = TempDir::new().unwrap();
    let saves = dir.path().join("saves");
    fs::create_dir_all(&saves).unwrap();
    fs::write(saves.join("Ghost_1.json"), r#"{"save":{}}"#).unwrap();

    let (app, output) = run_script(dir.path(), "2\n1\n5\n");

    assert!(output.contains("Error: Save error: Corrupted save Ghost_1"));
    assert!(app.current_save().is_none());
    assert!(output.ends_with("Bye.\n"));
}

#[test]
fn test_settings_menu_persists_changes() {
    let dir = TempDir::new().unwrap();
    let (app, output) = run_script(dir.path(), "2\n2\nb\n4\n");

    assert!(output.contains("\tDebug mode: off - 2\n"));
    assert!(output.contains("\tDebug mode: on - 2\n"));
    assert!(app.settings().debug_mode);

    let stored = Settings::load_settings_from_file(dir.path().join("settings.json")).unwrap();
    assert!(stored.debug_mode);
    assert!(!stored.color_output);
    assert_eq!(stored.save_dir, dir.path().join("saves"));
}

#[test]
fn test_about_and_invalid_menu_input() {
    let dir = TempDir::new().unwrap();
    let (_, output) = run_script(dir.path(), "9\n3\n4\n");

    assert!(output.contains("Invalid input. Enter one of the menu commands."));
    assert!(output.contains(&format!("Postnuc v{}", env!("CARGO_PKG_VERSION"))));
    assert!(!output.contains("Load game"));
}

#[test]
fn test_invalid_utf8_line_is_rejected_not_fatal() {
    let dir = TempDir::new().unwrap();
    let mut script = b"1\n1\nbob\n6\ns=\xff8\n".to_vec();
    script.extend_from_slice(b"s=8\np=1\nl=10\nc=6\nok\n5\n");

    let console = LineConsole::new(Cursor::new(script), Vec::new(), false);
    let mut app = App::new(console, settings_for(dir.path()), dir.path().join("settings.json"));
    app.run().expect("Expected the app to exit cleanly");
    let output = String::from_utf8(app.console().writer().clone()).unwrap();

    assert!(output.contains("The attribute value is not a number: '\u{FFFD}8'"));
    assert!(output.contains("Game saved as Bob_1"));
    assert_eq!(
        app.current_save().unwrap().character.special.get(SpecialStat::Strength),
        8
    );
    assert!(output.ends_with("Bye.\n"));
}
