//! Canonical answer vocabulary shared by storage, scoring, and aggregation.
//!
//! Every dimension is a closed enum; raw client tokens only ever reach these
//! types through `assessment::normalize`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of lower-case tokens stored verbatim in the database.
pub trait Canonical: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Exact match against the canonical (already lower-cased) token.
    fn from_canonical(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == token)
    }
}

/// Q1: how often the respondent uses AI tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Journey {
    Never,
    Rarely,
    Monthly,
    Weekly,
    Daily,
}

impl Canonical for Journey {
    const ALL: &'static [Self] = &[
        Journey::Never,
        Journey::Rarely,
        Journey::Monthly,
        Journey::Weekly,
        Journey::Daily,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Journey::Never => "never",
            Journey::Rarely => "rarely",
            Journey::Monthly => "monthly",
            Journey::Weekly => "weekly",
            Journey::Daily => "daily",
        }
    }
}

/// Q3a: seniority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleLevel {
    Executive,
    Management,
    Senior,
    Mid,
    Early,
    Freelance,
    Owner,
    Student,
}

impl Canonical for RoleLevel {
    const ALL: &'static [Self] = &[
        RoleLevel::Executive,
        RoleLevel::Management,
        RoleLevel::Senior,
        RoleLevel::Mid,
        RoleLevel::Early,
        RoleLevel::Freelance,
        RoleLevel::Owner,
        RoleLevel::Student,
    ];

    fn as_str(self) -> &'static str {
        match self {
            RoleLevel::Executive => "executive",
            RoleLevel::Management => "management",
            RoleLevel::Senior => "senior",
            RoleLevel::Mid => "mid",
            RoleLevel::Early => "early",
            RoleLevel::Freelance => "freelance",
            RoleLevel::Owner => "owner",
            RoleLevel::Student => "student",
        }
    }
}

/// Q4: self-reported understanding of AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Knowledge {
    Expert,
    Strategic,
    Basics,
    Lost,
    New,
}

impl Canonical for Knowledge {
    const ALL: &'static [Self] = &[
        Knowledge::Expert,
        Knowledge::Strategic,
        Knowledge::Basics,
        Knowledge::Lost,
        Knowledge::New,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Knowledge::Expert => "expert",
            Knowledge::Strategic => "strategic",
            Knowledge::Basics => "basics",
            Knowledge::Lost => "lost",
            Knowledge::New => "new",
        }
    }
}

/// Q6: the human strength the respondent leans on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Superpower {
    Creative,
    Emotional,
    Strategic,
    Leadership,
    Domain,
    Physical,
    Ethical,
    Cultural,
}

impl Canonical for Superpower {
    const ALL: &'static [Self] = &[
        Superpower::Creative,
        Superpower::Emotional,
        Superpower::Strategic,
        Superpower::Leadership,
        Superpower::Domain,
        Superpower::Physical,
        Superpower::Ethical,
        Superpower::Cultural,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Superpower::Creative => "creative",
            Superpower::Emotional => "emotional",
            Superpower::Strategic => "strategic",
            Superpower::Leadership => "leadership",
            Superpower::Domain => "domain",
            Superpower::Physical => "physical",
            Superpower::Ethical => "ethical",
            Superpower::Cultural => "cultural",
        }
    }
}

/// Q7: preferred learning pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    VeryFast,
    Fast,
    Moderate,
    Slow,
    VerySlow,
}

impl Canonical for LearningStyle {
    const ALL: &'static [Self] = &[
        LearningStyle::VeryFast,
        LearningStyle::Fast,
        LearningStyle::Moderate,
        LearningStyle::Slow,
        LearningStyle::VerySlow,
    ];

    fn as_str(self) -> &'static str {
        match self {
            LearningStyle::VeryFast => "veryfast",
            LearningStyle::Fast => "fast",
            LearningStyle::Moderate => "moderate",
            LearningStyle::Slow => "slow",
            LearningStyle::VerySlow => "veryslow",
        }
    }
}

/// Q8: two-year aspiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Leading,
    Managing,
    Specialist,
    Transitioning,
    Business,
    Balance,
}

impl Canonical for Goal {
    const ALL: &'static [Self] = &[
        Goal::Leading,
        Goal::Managing,
        Goal::Specialist,
        Goal::Transitioning,
        Goal::Business,
        Goal::Balance,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Goal::Leading => "leading",
            Goal::Managing => "managing",
            Goal::Specialist => "specialist",
            Goal::Transitioning => "transitioning",
            Goal::Business => "business",
            Goal::Balance => "balance",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(Journey, RoleLevel, Knowledge, Superpower, LearningStyle, Goal);
