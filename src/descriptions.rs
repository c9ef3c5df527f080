// region:  --- Point buy

use crate::special::SpecialStat;

pub const INTRO: &str = r#"
Welcome to the post-nuclear world. N years have passed since most of the world's warheads took to the air. You were lucky: your parents took part in the "Vault" experiment.
"#;

pub const SPECIAL_INTRO: &str = r#"
Time to distribute your SPECIAL points. SPECIAL is a system of seven attributes: S - Strength, P - Perception, E - Endurance, C - Charisma, I - Intelligence, A - Agility, L - Luck. Every attribute takes a value from 1 to 10. Set one with 's=2' or 'P = 3', or nudge it with 's+' and 's-'. When no points are left and you are happy with the result, type 'ok'.
"#;

pub const GENERAL: &str = r#"
A character has seven fundamental attributes, the SPECIAL system. For details about one of them type 'help X', where X is the name (or first letter) of the attribute.
"#;

// endregion:  --- Point buy

// region:  --- Attributes
pub const STRENGTH: &str = r#"
Strength(S) is raw physical power. It sets how much gear the character can carry and the damage dealt with fists, feet, melee and thrown weapons. It feeds carry weight, melee damage and hit points. Many weapons have a strength requirement: every missing point lowers the chance to hit by 20%.
"#;

pub const PERCEPTION: &str = r#"
Perception(P) is the sharpness of sight and hearing. A sniper cannot live without it. It drives Sequence and the Lockpick, Traps, First Aid and Doctor skills. It also sets effective shooting range, the chance to notice small details and traps, and the distance to the enemy when a random encounter begins.
"#;

pub const ENDURANCE: &str = r#"
Endurance(E) is the ability to shrug off wounds and trauma. It feeds hit points, poison and radiation resistance, healing rate and the Outdoorsman skill. It also decides whether the character can take certain critical hits, like a shot to the head, without losing consciousness.
"#;

pub const CHARISMA: &str = r#"
Charisma(C) is the power to charm through presence and good looks. High charisma helps you find common ground with many characters and shapes their first reaction to you. Attractive people are harder to charm in return. Barter and Speech depend on it.
"#;

pub const INTELLIGENCE: &str = r#"
Intelligence(I) is wit and quickness of mind. It sets the number of skill points gained per level. It affects no derived stats but underpins many non-combat skills. It matters most in conversation: smarter characters get more dialogue options, ask better questions and find more ways through some quests.
"#;

pub const AGILITY: &str = r#"
Agility(A) is speed and coordination. It decides how far the character moves in combat and supports most physical skills. It feeds Armor Class and action points and most skills, combat ones above all. The more agile the character, the better the odds of dodging a trap or picking a lock.
"#;

pub const LUCK: &str = r#"
Luck(L) is the strangest of the attributes: it tips the outcome of all sorts of events. It feeds critical chance and the Gambling skill. The luckier the character, the more often they land critical hits and the harder those hit. Luck also shapes many events and the odds of special encounters.
"#;

// endregion:  --- Attributes

pub fn for_stat(stat: SpecialStat) -> &'static str {
    match stat {
        SpecialStat::Strength => STRENGTH,
        SpecialStat::Perception => PERCEPTION,
        SpecialStat::Endurance => ENDURANCE,
        SpecialStat::Charisma => CHARISMA,
        SpecialStat::Intelligence => INTELLIGENCE,
        SpecialStat::Agility => AGILITY,
        SpecialStat::Luck => LUCK,
    }
}

pub fn wrapped(text: &str, width: usize) -> String {
    textwrap::fill(text.trim(), width)
}
