//! Rule overrides loaded from a JSON file.
//!
//! The file is optional. Every key is optional, unknown keys are refused,
//! and a key that belongs to the other work policy is an error rather than
//! silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::agency::rules::{Mode, RuleSet, WorkPolicy};
use crate::agency::state::REPUTATION_CAP;

/// Largest amount any money override may hold.
pub const MONEY_CAP: i64 = 1_000_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid rule override: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOverrides {
    pub mode: Option<Mode>,
    pub starting_budget: Option<i64>,
    pub starting_reputation: Option<i32>,
    /// Last playable turn.
    pub horizon: Option<u32>,
    /// Play without a horizon.
    pub endless: bool,
    pub bankruptcy_requires_staff: Option<bool>,

    // Skill-matched (daily) rules
    pub max_active_projects: Option<usize>,
    pub upkeep_per_head: Option<i64>,

    // Capacity-counted (weekly) rules
    pub rate_per_client: Option<i64>,
    pub salary_per_head: Option<i64>,
    pub operating_cost: Option<i64>,
    pub min_reputation: Option<i32>,
    pub idle_penalty: Option<i32>,
}

/// Resolve the rule set for a session.
///
/// Mode precedence: command line, then the file, then weekly.
pub fn load_rules(cli_mode: Option<Mode>, path: Option<&Path>) -> Result<RuleSet, ConfigError> {
    let overrides = match path {
        Some(path) => read_overrides(path)?,
        None => RuleOverrides::default(),
    };
    let mode = cli_mode.or(overrides.mode).unwrap_or(Mode::Weekly);
    let rules = overrides.apply(RuleSet::for_mode(mode))?;
    tracing::debug!(?rules, "rules resolved");
    Ok(rules)
}

pub fn read_overrides(path: &Path) -> Result<RuleOverrides, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

fn ensure_money(amount: i64, min: i64, name: &str) -> Result<(), ConfigError> {
    if (min..=MONEY_CAP).contains(&amount) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be between {min} and {MONEY_CAP}"
        )))
    }
}

fn refuse_foreign(mode: &str, fields: &[(&str, bool)]) -> Result<(), ConfigError> {
    match fields.iter().find(|(_, present)| *present) {
        Some((name, _)) => Err(ConfigError::Invalid(format!(
            "`{name}` only applies to {mode} rules"
        ))),
        None => Ok(()),
    }
}

impl RuleOverrides {
    pub fn apply(self, mut rules: RuleSet) -> Result<RuleSet, ConfigError> {
        if let Some(budget) = self.starting_budget {
            ensure_money(budget, 1, "starting_budget")?;
            rules.starting_budget = budget;
        }
        if let Some(reputation) = self.starting_reputation {
            ensure(
                (1..=REPUTATION_CAP).contains(&reputation),
                "starting_reputation must be between 1 and 100",
            )?;
            rules.starting_reputation = reputation;
        }
        ensure(
            !(self.endless && self.horizon.is_some()),
            "`horizon` and `endless` cannot both be set",
        )?;
        if let Some(horizon) = self.horizon {
            ensure(horizon >= 1, "horizon must be at least 1")?;
            rules.horizon = Some(horizon);
        }
        if self.endless {
            rules.horizon = None;
        }
        if let Some(flag) = self.bankruptcy_requires_staff {
            rules.bankruptcy_requires_staff = flag;
        }

        match &mut rules.work {
            WorkPolicy::SkillMatched {
                max_active,
                upkeep_per_head,
                ..
            } => {
                refuse_foreign(
                    "weekly",
                    &[
                        ("rate_per_client", self.rate_per_client.is_some()),
                        ("salary_per_head", self.salary_per_head.is_some()),
                        ("operating_cost", self.operating_cost.is_some()),
                        ("min_reputation", self.min_reputation.is_some()),
                        ("idle_penalty", self.idle_penalty.is_some()),
                    ],
                )?;
                if let Some(n) = self.max_active_projects {
                    ensure(n >= 1, "max_active_projects must be at least 1")?;
                    *max_active = n;
                }
                if let Some(cost) = self.upkeep_per_head {
                    ensure_money(cost, 0, "upkeep_per_head")?;
                    *upkeep_per_head = cost;
                }
            }
            WorkPolicy::CapacityCounted {
                min_reputation,
                rate_per_client,
                salary_per_head,
                operating_cost,
                idle_penalty,
                ..
            } => {
                refuse_foreign(
                    "daily",
                    &[
                        ("max_active_projects", self.max_active_projects.is_some()),
                        ("upkeep_per_head", self.upkeep_per_head.is_some()),
                    ],
                )?;
                if let Some(rate) = self.rate_per_client {
                    ensure_money(rate, 0, "rate_per_client")?;
                    *rate_per_client = rate;
                }
                if let Some(salary) = self.salary_per_head {
                    ensure_money(salary, 0, "salary_per_head")?;
                    *salary_per_head = salary;
                }
                if let Some(cost) = self.operating_cost {
                    ensure_money(cost, 0, "operating_cost")?;
                    *operating_cost = cost;
                }
                if let Some(floor) = self.min_reputation {
                    ensure(
                        (0..=REPUTATION_CAP).contains(&floor),
                        "min_reputation must be between 0 and 100",
                    )?;
                    *min_reputation = floor;
                }
                if let Some(penalty) = self.idle_penalty {
                    ensure(penalty >= 0, "idle_penalty cannot be negative")?;
                    *idle_penalty = penalty;
                }
            }
        }

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agency::logic::{self, Command};
    use crate::agency::state::AgencyState;

    fn parse(json: &str) -> RuleOverrides {
        serde_json::from_str(json).unwrap()
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "ai-agency-{}-{name}.json",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn no_file_means_weekly_defaults() {
        assert_eq!(load_rules(None, None).unwrap(), RuleSet::weekly());
        assert_eq!(load_rules(Some(Mode::Daily), None).unwrap(), RuleSet::daily());
    }

    #[test]
    fn empty_object_changes_nothing() {
        let rules = parse("{}").apply(RuleSet::daily()).unwrap();
        assert_eq!(rules, RuleSet::daily());
    }

    #[test]
    fn overrides_apply() {
        let rules = parse(
            r#"{"starting_budget": 20000, "horizon": 10, "rate_per_client": 6000, "idle_penalty": 0}"#,
        )
        .apply(RuleSet::weekly())
        .unwrap();
        assert_eq!(rules.starting_budget, 20_000);
        assert_eq!(rules.horizon, Some(10));
        let WorkPolicy::CapacityCounted {
            rate_per_client,
            idle_penalty,
            ..
        } = rules.work
        else {
            panic!("weekly rules lost their policy");
        };
        assert_eq!(rate_per_client, 6_000);
        assert_eq!(idle_penalty, 0);
    }

    #[test]
    fn endless_removes_horizon() {
        let rules = parse(r#"{"endless": true}"#).apply(RuleSet::weekly()).unwrap();
        assert_eq!(rules.horizon, None);
        let err = parse(r#"{"endless": true, "horizon": 5}"#)
            .apply(RuleSet::weekly())
            .unwrap_err();
        assert!(err.to_string().contains("cannot both be set"));
    }

    #[test]
    fn unknown_keys_are_refused() {
        assert!(serde_json::from_str::<RuleOverrides>(r#"{"budget": 5}"#).is_err());
    }

    #[test]
    fn foreign_policy_keys_are_refused() {
        let err = parse(r#"{"max_active_projects": 5}"#)
            .apply(RuleSet::weekly())
            .unwrap_err();
        assert!(err.to_string().contains("max_active_projects"));

        let err = parse(r#"{"salary_per_head": 100}"#)
            .apply(RuleSet::daily())
            .unwrap_err();
        assert!(err.to_string().contains("only applies to weekly rules"));
    }

    #[test]
    fn out_of_range_values_are_refused() {
        for json in [
            r#"{"starting_budget": 0}"#,
            r#"{"starting_reputation": 101}"#,
            r#"{"starting_reputation": 0}"#,
            r#"{"horizon": 0}"#,
            r#"{"min_reputation": -1}"#,
        ] {
            assert!(
                parse(json).apply(RuleSet::weekly()).is_err(),
                "{json} was accepted"
            );
        }
        assert!(parse(r#"{"max_active_projects": 0}"#)
            .apply(RuleSet::daily())
            .is_err());
    }

    #[test]
    fn money_above_the_cap_is_refused() {
        let huge = MONEY_CAP + 1;
        for key in ["starting_budget", "rate_per_client", "salary_per_head", "operating_cost"] {
            let err = parse(&format!(r#"{{"{key}": {huge}}}"#))
                .apply(RuleSet::weekly())
                .unwrap_err();
            assert!(err.to_string().contains(key), "{err}");
        }
        assert!(parse(&format!(r#"{{"upkeep_per_head": {huge}}}"#))
            .apply(RuleSet::daily())
            .is_err());
        assert!(parse(r#"{"starting_budget": 9223372036854775000}"#)
            .apply(RuleSet::weekly())
            .is_err());

        let rules = parse(&format!(r#"{{"starting_budget": {MONEY_CAP}}}"#))
            .apply(RuleSet::weekly())
            .unwrap();
        assert_eq!(rules.starting_budget, MONEY_CAP);
    }

    #[test]
    fn staff_requirement_override_spares_a_founders_only_agency() {
        let path = temp_file(
            "staff",
            r#"{"bankruptcy_requires_staff": true, "starting_budget": 3000}"#,
        );
        let rules = load_rules(Some(Mode::Weekly), Some(&path)).unwrap();
        fs::remove_file(path).unwrap();
        assert!(rules.bankruptcy_requires_staff);

        let state = AgencyState::new(&rules);
        let step = logic::apply(&state, &rules, Command::EndPeriod);
        assert_eq!(step.state.budget, 0);
        assert!(step.state.roster.is_empty());
        assert_eq!(step.state.ending, None);

        let step = logic::apply(&step.state, &rules, Command::EndPeriod);
        assert_eq!(step.state.budget, -3_000);
        assert_eq!(step.state.ending, None);
    }

    #[test]
    fn cli_mode_beats_file_mode() {
        let path = temp_file("mode", r#"{"mode": "daily", "starting_budget": 1234}"#);
        let from_file = load_rules(None, Some(&path)).unwrap();
        assert_eq!(from_file.mode, Mode::Daily);
        assert_eq!(from_file.starting_budget, 1_234);

        let from_cli = load_rules(Some(Mode::Weekly), Some(&path)).unwrap();
        assert_eq!(from_cli.mode, Mode::Weekly);
        assert_eq!(from_cli.starting_budget, 1_234);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_errors_are_reported() {
        let missing = std::env::temp_dir().join("ai-agency-does-not-exist.json");
        assert!(matches!(
            load_rules(None, Some(&missing)),
            Err(ConfigError::Io { .. })
        ));

        let path = temp_file("broken", "{ not json");
        assert!(matches!(
            load_rules(None, Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
        fs::remove_file(path).unwrap();
    }
}
