//! Answer normalization: raw UI, legacy prototype, or canonical tokens in,
//! canonical enums out.
//!
//! Every function here is total. Unknown input falls back to the dimension's
//! neutral default and is logged as a data-quality signal, never rejected.

use tracing::warn;

use crate::assessment::answers::{
    Canonical, Goal, Journey, Knowledge, LearningStyle, RoleLevel, Superpower,
};

pub const DEFAULT_JOURNEY: Journey = Journey::Monthly;
pub const DEFAULT_KNOWLEDGE: Knowledge = Knowledge::Basics;
pub const DEFAULT_LEARNING_STYLE: LearningStyle = LearningStyle::Moderate;
pub const DEFAULT_GOAL: Goal = Goal::Balance;
pub const DEFAULT_SUPERPOWER: Superpower = Superpower::Strategic;

const JOURNEY_ALIASES: &[(&str, Journey)] = &[
    ("daily-user", Journey::Daily),
    ("experimenting", Journey::Weekly),
    ("curious", Journey::Monthly),
    ("behind", Journey::Rarely),
    ("new", Journey::Never),
];

const KNOWLEDGE_ALIASES: &[(&str, Knowledge)] = &[
    ("practical", Knowledge::Basics),
    ("zero", Knowledge::New),
];

const LEARNING_STYLE_ALIASES: &[(&str, LearningStyle)] = &[
    ("dive-in", LearningStyle::VeryFast),
    ("experiential", LearningStyle::VeryFast),
    ("structured", LearningStyle::Fast),
    ("sequential", LearningStyle::Fast),
    ("understand-why", LearningStyle::Moderate),
    ("conceptual", LearningStyle::Moderate),
    ("guided", LearningStyle::Slow),
    ("supported", LearningStyle::Slow),
    ("practice", LearningStyle::VerySlow),
    ("iterative", LearningStyle::VerySlow),
];

const GOAL_ALIASES: &[(&str, Goal)] = &[
    ("changemaker", Goal::Leading),
    ("leadership", Goal::Leading),
    ("entrepreneur", Goal::Business),
    ("security", Goal::Balance),
];

/// Trims, lower-cases, and folds `_` into `-` so `dive_in` and `Dive-In` agree.
pub fn clean_token(raw: &str) -> String {
    raw.trim().to_lowercase().replace('_', "-")
}

fn resolve<T: Canonical>(
    dimension: &str,
    raw: Option<&str>,
    aliases: &[(&str, T)],
    default: T,
) -> T {
    let token = match raw.map(clean_token) {
        Some(t) if !t.is_empty() => t,
        _ => return default,
    };

    if let Some(value) = T::from_canonical(&token) {
        return value;
    }
    if let Some((_, value)) = aliases.iter().find(|(alias, _)| *alias == token) {
        return *value;
    }

    warn!(
        dimension,
        token = %token,
        fallback = default.as_str(),
        "Unrecognized answer token, using default"
    );
    default
}

pub fn normalize_journey(raw: Option<&str>) -> Journey {
    resolve("journey", raw, JOURNEY_ALIASES, DEFAULT_JOURNEY)
}

pub fn normalize_knowledge(raw: Option<&str>) -> Knowledge {
    resolve("knowledge", raw, KNOWLEDGE_ALIASES, DEFAULT_KNOWLEDGE)
}

pub fn normalize_learning_style(raw: Option<&str>) -> LearningStyle {
    resolve(
        "learning_style",
        raw,
        LEARNING_STYLE_ALIASES,
        DEFAULT_LEARNING_STYLE,
    )
}

pub fn normalize_goal(raw: Option<&str>) -> Goal {
    resolve("goal", raw, GOAL_ALIASES, DEFAULT_GOAL)
}

pub fn normalize_superpower(raw: Option<&str>) -> Superpower {
    resolve("superpower", raw, &[], DEFAULT_SUPERPOWER)
}

/// Buckets a free-text title (or level token) into a `RoleLevel`.
///
/// Canonical tokens pass through; otherwise substring heuristics apply and
/// anything unmatched is `Mid`.
pub fn role_level_from_title(raw: &str) -> RoleLevel {
    let text = raw.trim().to_lowercase();
    if let Some(level) = RoleLevel::from_canonical(&text) {
        return level;
    }
    if ["exec", "executive", "cxo", "vp"]
        .iter()
        .any(|s| text.contains(s))
    {
        return RoleLevel::Executive;
    }
    if ["manager", "management"].iter().any(|s| text.contains(s)) {
        return RoleLevel::Management;
    }
    if text.contains("senior") {
        return RoleLevel::Senior;
    }
    if text.contains("intern") || text.contains("student") {
        return RoleLevel::Student;
    }
    RoleLevel::Mid
}

/// Resolves the optional role level: the explicit level token wins, the role
/// title is the fallback hint, and with neither the level stays unset.
pub fn normalize_role_level(level: Option<&str>, role_title: Option<&str>) -> Option<RoleLevel> {
    [level, role_title]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(role_level_from_title)
}

/// Free-text industry label: trimmed and lower-cased; absent becomes empty.
pub fn normalize_industry(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}
