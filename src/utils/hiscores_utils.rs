/// Skill tables in upstream order, the position is the `table` index of the ranking page.
pub const SKILLS: &[&str] = &[
    "overall",
    "attack",
    "defence",
    "strength",
    "hitpoints",
    "ranged",
    "prayer",
    "magic",
    "cooking",
    "woodcutting",
    "fletching",
    "fishing",
    "firemaking",
    "crafting",
    "smithing",
    "mining",
    "herblore",
    "agility",
    "thieving",
    "slayer",
    "farming",
    "runecraft",
    "hunter",
    "construction",
];

/// Activity tables in upstream order (`category_type=1`).
pub const ACTIVITIES: &[&str] = &[
    "league_points",
    "deadman_points",
    "bounty_hunter_hunter",
    "bounty_hunter_rogue",
    "bounty_hunter_legacy_hunter",
    "bounty_hunter_legacy_rogue",
    "clue_scrolls_all",
    "clue_scrolls_beginner",
    "clue_scrolls_easy",
    "clue_scrolls_medium",
    "clue_scrolls_hard",
    "clue_scrolls_elite",
    "clue_scrolls_master",
    "lms_rank",
    "pvp_arena_rank",
    "soul_wars_zeal",
    "rifts_closed",
    "colosseum_glory",
    "collections_logged",
    "abyssal_sire",
    "alchemical_hydra",
    "amoxliatl",
    "araxxor",
    "artio",
    "barrows_chests",
    "bryophyta",
    "callisto",
    "cal_varion",
    "cerberus",
    "chambers_of_xeric",
    "chambers_of_xeric_challenge_mode",
    "chaos_elemental",
    "chaos_fanatic",
    "commander_zilyana",
    "corporeal_beast",
    "crazy_archaeologist",
    "dagannoth_prime",
    "dagannoth_rex",
    "dagannoth_supreme",
    "deranged_archaeologist",
    "duke_sucellus",
    "general_graardor",
    "giant_mole",
    "grotesque_guardians",
    "hespori",
    "kalphite_queen",
    "king_black_dragon",
    "kraken",
    "kree_arra",
    "k_ril_tsutsaroth",
    "lunar_chests",
    "mimic",
    "nex",
    "nightmare",
    "phosani_s_nightmare",
    "obor",
    "phantom_muspah",
    "sarachnis",
    "scorpia",
    "scurrius",
    "skotizo",
    "sol_heredit",
    "spindel",
    "tempoross",
    "the_gauntlet",
    "the_corrupted_gauntlet",
    "the_hueycoatl",
    "the_leviathan",
    "the_whisperer",
    "theatre_of_blood",
    "theatre_of_blood_hard_mode",
    "thermonuclear_smoke_devil",
    "tombs_of_amascut",
    "tombs_of_amascut_expert_mode",
    "tzkal_zuk",
    "tztok_jad",
    "vardorvis",
    "venenatis",
    "vet_ion",
    "vorkath",
    "wintertodt",
    "zalcano",
    "zulrah",
];

/// Activities that are points tables or minigames rather than boss kill counts.
pub const MINIGAMES: &[&str] = &[
    "league_points",
    "deadman_points",
    "bounty_hunter_hunter",
    "bounty_hunter_rogue",
    "bounty_hunter_legacy_hunter",
    "bounty_hunter_legacy_rogue",
    "lms_rank",
    "pvp_arena_rank",
    "soul_wars_zeal",
    "rifts_closed",
    "colosseum_glory",
    "collections_logged",
];

const CLUE_PREFIX: &str = "clue_scrolls_";

/// Upstream path segment for each game mode.
const MODES: &[(&str, &str)] = &[
    ("main", "hiscore_oldschool"),
    ("ironman", "hiscore_oldschool_ironman"),
    ("hardcore", "hiscore_oldschool_hardcore_ironman"),
    ("ultimate", "hiscore_oldschool_ultimate"),
    ("deadman", "hiscore_oldschool_deadman"),
    ("seasonal", "hiscore_oldschool_seasonal"),
    ("tournament", "hiscore_oldschool_tournament"),
    ("fresh_start", "hiscore_oldschool_fresh_start"),
    ("skiller", "hiscore_oldschool_skiller"),
    ("one_defence", "hiscore_oldschool_skiller_defence"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Clue,
    Minigame,
    Boss,
}

/// Turns a display name like `"Clue Scrolls (all)"` or `"Kree'Arra"` into the key used in
/// routes and response objects (`clue_scrolls_all`, `kree_arra`).
pub fn to_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    key
}

pub fn mode_path(mode: &str) -> Option<&'static str> {
    MODES
        .iter()
        .find(|(name, _)| *name == mode)
        .map(|(_, path)| *path)
}

pub fn skill_table(skill: &str) -> Option<usize> {
    let key = to_key(skill);
    SKILLS.iter().position(|s| *s == key)
}

pub fn activity_table(activity: &str) -> Option<usize> {
    let key = to_key(activity);
    ACTIVITIES.iter().position(|a| *a == key)
}

pub fn activity_category(key: &str) -> ActivityCategory {
    if key.starts_with(CLUE_PREFIX) {
        ActivityCategory::Clue
    } else if MINIGAMES.contains(&key) {
        ActivityCategory::Minigame
    } else {
        ActivityCategory::Boss
    }
}

/// Parses upstream numbers, which may carry thousands separators.
pub fn parse_number(value: &str) -> Option<i64> {
    value
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect::<String>()
        .parse()
        .ok()
}
