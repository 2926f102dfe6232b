// Save file constants
pub const SIGNATURE: &[u8] = b"FALLOUT SAVE FILE";
pub const SIGNATURE_SIZE: usize = 24;
pub const PREVIEW_SIZE: usize = 29_792; // 224x133 thumbnail
pub const HEADER_PADDING: usize = 128;
pub const HEADER_SIZE: usize = 30_051;
pub const SAVE_FILE_NAME: &str = "SAVE.DAT";

pub const SAVEABLE_STAT_COUNT: usize = 35;
pub const SPECIAL_STAT_COUNT: usize = 7;
pub const SKILL_COUNT: usize = 18;
pub const PERK_COUNT: usize = 119;
pub const KILL_TYPE_COUNT: usize = 19;
pub const TAGGED_SKILL_COUNT: usize = 4;

// Critter proto block (handler 6): sneak_working, flags, base stats,
// bonus stats, skills, body type, experience, kill type.
pub const CRITTER_PROTO_SIZE: usize = 372;
pub const BASE_STATS_OFFSET: usize = 8;
pub const SKILLS_OFFSET: usize = BASE_STATS_OFFSET + SAVEABLE_STAT_COUNT * 4 * 2;

// Kill counts and tagged skills follow the critter proto; the player's
// perk ranks come straight after (handler 9 is empty).
pub const PERKS_OFFSET: usize = CRITTER_PROTO_SIZE + KILL_TYPE_COUNT * 4 + TAGGED_SKILL_COUNT * 4;

/// SPECIAL keys in base stat order.
pub const STAT_KEYS: [&str; SPECIAL_STAT_COUNT] = ["str", "per", "end", "cha", "int", "agi", "luc"];

pub const SKILL_KEYS: [&str; SKILL_COUNT] = [
    "small_guns",
    "big_guns",
    "energy_weapons",
    "unarmed",
    "melee_weapons",
    "throwing",
    "first_aid",
    "doctor",
    "sneak",
    "lockpick",
    "steal",
    "traps",
    "science",
    "repair",
    "speech",
    "barter",
    "gambling",
    "outdoorsman",
];

pub const PERK_KEYS: [&str; PERK_COUNT] = [
    "awareness",
    "bonus_hth_attacks",
    "bonus_hth_damage",
    "bonus_move",
    "bonus_ranged_damage",
    "bonus_rate_of_fire",
    "earlier_sequence",
    "faster_healing",
    "more_criticals",
    "night_vision",
    "presence",
    "rad_resistance",
    "toughness",
    "strong_back",
    "sharpshooter",
    "silent_running",
    "survivalist",
    "master_trader",
    "educated",
    "healer",
    "fortune_finder",
    "better_criticals",
    "empathy",
    "slayer",
    "sniper",
    "silent_death",
    "action_boy",
    "mental_block",
    "lifegiver",
    "dodger",
    "snakeater",
    "mr_fixit",
    "medic",
    "master_thief",
    "speaker",
    "heave_ho",
    "friendly_foe",
    "pickpocket",
    "ghost",
    "cult_of_personality",
    "scrounger",
    "explorer",
    "flower_child",
    "pathfinder",
    "animal_friend",
    "scout",
    "mysterious_stranger",
    "ranger",
    "quick_pockets",
    "smooth_talker",
    "swift_learner",
    "tag",
    "mutate",
    // Pseudo-perks (addictions, weapon/armor mods, implants)
    "nuka_cola_addiction",
    "buffout_addiction",
    "mentats_addiction",
    "psycho_addiction",
    "radaway_addiction",
    "weapon_long_range",
    "weapon_accurate",
    "weapon_penetrate",
    "weapon_knockback",
    "powered_armor",
    "combat_armor",
    "weapon_scope_range",
    "weapon_fast_reload",
    "weapon_night_sight",
    "weapon_flameboy",
    "armor_advanced_1",
    "armor_advanced_2",
    "jet_addiction",
    "tragic_addiction",
    "armor_charisma",
    "gecko_skinning",
    "dermal_impact_armor",
    "dermal_impact_assault_enhancement",
    "phoenix_armor_implants",
    "phoenix_assault_enhancement",
    "vault_city_inoculations",
    "adrenaline_rush",
    "cautious_nature",
    "comprehension",
    "demolition_expert",
    "gambler",
    "gain_strength",
    "gain_perception",
    "gain_endurance",
    "gain_charisma",
    "gain_intelligence",
    "gain_agility",
    "gain_luck",
    "harmless",
    "here_and_now",
    "hth_evade",
    "kama_sutra_master",
    "karma_beacon",
    "light_step",
    "living_anatomy",
    "magnetic_personality",
    "negotiator",
    "pack_rat",
    "pyromaniac",
    "quick_recovery",
    "salesman",
    "stonewall",
    "thief",
    "weapon_handling",
    "vault_city_training",
    "alcohol_raised_hit_points",
    "alcohol_raised_hit_points_2",
    "alcohol_lowered_hit_points",
    "alcohol_lowered_hit_points_2",
    "autodoc_raised_hit_points",
    "autodoc_raised_hit_points_2",
    "autodoc_lowered_hit_points",
    "autodoc_lowered_hit_points_2",
    "expert_excrement_expediter",
    "weapon_enhanced_knockout",
    "jinxed",
];
