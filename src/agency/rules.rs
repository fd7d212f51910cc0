//! Rule sets: every tunable number of a session, fixed at start.

use serde::Deserialize;

use super::state::{SpecialistOffer, GENERALISTS, SPECIALISTS};

/// Which preset a session starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
pub enum Mode {
    /// Skill-matched projects, one day per turn.
    Daily,
    /// Counted clients, one week per turn, a 52-week season.
    Weekly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
}

impl Period {
    pub fn name(self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
        }
    }

    pub fn lower(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
        }
    }
}

/// How the agency takes on paid work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkPolicy {
    /// Individual projects from the catalog, each needing a matching skill
    /// on the roster, paid out when their timer runs down.
    SkillMatched {
        max_active: usize,
        reputation_per_completion: i32,
        upkeep_per_head: i64,
    },
    /// Anonymous clients counted against staff capacity and paid in full at
    /// the end of the period they were taken.
    CapacityCounted {
        clients_per_employee: u32,
        min_reputation: i32,
        reputation_per_client: i32,
        rate_per_client: i64,
        salary_per_head: i64,
        operating_cost: i64,
        idle_penalty: i32,
    },
}

/// A paid, instant reputation action (marketing, training).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Boost {
    pub name: &'static str,
    pub cost: i64,
    pub reputation: i32,
}

pub const MARKETING: Boost = Boost {
    name: "Marketing campaign",
    cost: 2_000,
    reputation: 15,
};

pub const TRAINING: Boost = Boost {
    name: "Team training",
    cost: 1_500,
    reputation: 5,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    pub mode: Mode,
    pub period: Period,
    pub starting_budget: i64,
    pub starting_reputation: i32,
    pub founders: u32,
    /// Last playable turn; passing it wins. `None` plays on forever.
    pub horizon: Option<u32>,
    /// Only declare bankruptcy once somebody has been hired.
    pub bankruptcy_requires_staff: bool,
    pub marketing: Option<Boost>,
    pub training: Option<Boost>,
    pub work: WorkPolicy,
}

impl RuleSet {
    pub fn daily() -> Self {
        Self {
            mode: Mode::Daily,
            period: Period::Day,
            starting_budget: 50_000,
            starting_reputation: 50,
            founders: 0,
            horizon: None,
            bankruptcy_requires_staff: true,
            marketing: None,
            training: None,
            work: WorkPolicy::SkillMatched {
                max_active: 3,
                reputation_per_completion: 5,
                upkeep_per_head: 200,
            },
        }
    }

    pub fn weekly() -> Self {
        Self {
            mode: Mode::Weekly,
            period: Period::Week,
            starting_budget: 10_000,
            starting_reputation: 50,
            founders: 1,
            horizon: Some(52),
            bankruptcy_requires_staff: false,
            marketing: Some(MARKETING),
            training: Some(TRAINING),
            work: WorkPolicy::CapacityCounted {
                clients_per_employee: 2,
                min_reputation: 30,
                reputation_per_client: 10,
                rate_per_client: 5_000,
                salary_per_head: 2_000,
                operating_cost: 1_000,
                idle_penalty: 5,
            },
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Daily => Self::daily(),
            Mode::Weekly => Self::weekly(),
        }
    }

    /// Hireable roles under these rules.
    pub fn specialists(&self) -> &'static [SpecialistOffer] {
        match self.work {
            WorkPolicy::SkillMatched { .. } => &SPECIALISTS,
            WorkPolicy::CapacityCounted { .. } => &GENERALISTS,
        }
    }

    pub fn specialist(&self, id: u32) -> Option<&'static SpecialistOffer> {
        self.specialists().iter().find(|s| s.id == id)
    }

    pub fn is_skill_matched(&self) -> bool {
        matches!(self.work, WorkPolicy::SkillMatched { .. })
    }

    /// Cost charged per head each period.
    pub fn cost_per_head(&self) -> i64 {
        match self.work {
            WorkPolicy::SkillMatched { upkeep_per_head, .. } => upkeep_per_head,
            WorkPolicy::CapacityCounted { salary_per_head, .. } => salary_per_head,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_their_mode() {
        for mode in [Mode::Daily, Mode::Weekly] {
            assert_eq!(RuleSet::for_mode(mode).mode, mode);
        }
        assert!(RuleSet::daily().is_skill_matched());
        assert!(!RuleSet::weekly().is_skill_matched());
    }

    #[test]
    fn catalogs_follow_policy() {
        assert_eq!(RuleSet::daily().specialists().len(), 5);
        assert_eq!(RuleSet::weekly().specialists().len(), 1);
        assert_eq!(RuleSet::weekly().specialist(1).map(|s| s.cost), Some(3_000));
        assert!(RuleSet::weekly().specialist(2).is_none());
    }

    #[test]
    fn boosts_give_reputation() {
        for boost in [MARKETING, TRAINING] {
            assert!(boost.cost > 0);
            assert!(boost.reputation > 0, "{} gives nothing", boost.name);
        }
    }

    #[test]
    fn mode_deserializes_kebab_case() {
        let mode: Mode = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(mode, Mode::Weekly);
    }
}
