//! Agency engine: pure transitions, no rendering or IO.
//!
//! Every operation takes the current state by reference and returns a fresh
//! [`Step`]. Work happens on a private copy, so a rejected action never leaks
//! a half-applied change.

use super::outcome::{Ending, Event, PeriodReport, Rejection, Summary};
use super::rules::{Boost, RuleSet, WorkPolicy};
use super::state::{
    clamp_reputation, project_offer, ActiveProject, AgencyState, Money, RosterMember,
};

pub type Outcome = Result<Event, Rejection>;

/// Resulting state plus what happened.
#[derive(Clone, Debug)]
pub struct Step {
    pub state: AgencyState,
    pub outcome: Outcome,
}

/// A player command as the shells see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Hire(u32),
    /// Project id under skill-matched rules; ignored when clients are counted.
    AcceptWork(Option<u32>),
    Market,
    Train,
    EndPeriod,
}

pub fn apply(state: &AgencyState, rules: &RuleSet, command: Command) -> Step {
    match command {
        Command::Hire(id) => hire(state, rules, id),
        Command::AcceptWork(project) => accept_work(state, rules, project),
        Command::Market => invest_marketing(state, rules),
        Command::Train => train_team(state, rules),
        Command::EndPeriod => advance_period(state, rules),
    }
}

pub fn hire(state: &AgencyState, rules: &RuleSet, offer_id: u32) -> Step {
    transition(state, |next| hire_specialist(next, rules, offer_id))
}

pub fn accept_work(state: &AgencyState, rules: &RuleSet, project_id: Option<u32>) -> Step {
    transition(state, |next| match &rules.work {
        WorkPolicy::SkillMatched { max_active, .. } => {
            start_project(next, rules, *max_active, project_id)
        }
        WorkPolicy::CapacityCounted {
            clients_per_employee,
            min_reputation,
            reputation_per_client,
            rate_per_client,
            ..
        } => {
            let capacity = next.headcount() * clients_per_employee;
            if next.open_clients >= capacity {
                return Err(Rejection::NoCapacity {
                    clients: next.open_clients,
                    capacity,
                });
            }
            if next.reputation < *min_reputation {
                return Err(Rejection::ReputationTooLow {
                    reputation: next.reputation,
                    required: *min_reputation,
                });
            }
            next.open_clients += 1;
            next.reputation = clamp_reputation(next.reputation + reputation_per_client);
            tracing::debug!(clients = next.open_clients, "client taken");
            Ok(Event::ClientTaken {
                rate: Money(*rate_per_client),
                reputation: next.reputation,
            })
        }
    })
}

pub fn invest_marketing(state: &AgencyState, rules: &RuleSet) -> Step {
    transition(state, |next| boost(next, rules.marketing, "Marketing"))
}

pub fn train_team(state: &AgencyState, rules: &RuleSet) -> Step {
    transition(state, |next| boost(next, rules.training, "Training"))
}

/// Close the current period: pay out, charge upkeep, move the clock and
/// check whether the session is over.
pub fn advance_period(state: &AgencyState, rules: &RuleSet) -> Step {
    transition(state, |next| Ok(Event::PeriodClosed(close_period(next, rules))))
}

// ── Handlers ──────────────────────────────────────────────────────────

fn transition(state: &AgencyState, action: impl FnOnce(&mut AgencyState) -> Outcome) -> Step {
    if let Some(ending) = state.ending {
        return Step {
            state: state.clone(),
            outcome: Err(Rejection::GameOver(ending)),
        };
    }

    let mut next = state.clone();
    let outcome = action(&mut next);
    let mut next = match &outcome {
        Ok(_) => next,
        Err(rejection) => {
            tracing::debug!(%rejection, "action rejected");
            state.clone()
        }
    };
    match &outcome {
        Ok(event) => next.post(event.to_string()),
        Err(rejection) => next.post(rejection.to_string()),
    }
    Step {
        state: next,
        outcome,
    }
}

fn hire_specialist(state: &mut AgencyState, rules: &RuleSet, offer_id: u32) -> Outcome {
    let offer = rules
        .specialist(offer_id)
        .ok_or(Rejection::UnknownSpecialist(offer_id))?;
    if state.budget < offer.cost {
        return Err(Rejection::InsufficientBudget {
            item: offer.name,
            cost: Money(offer.cost),
            available: Money(state.budget),
        });
    }

    state.budget -= offer.cost;
    state.roster.push(RosterMember {
        id: state.next_member_id,
        name: offer.name,
        skill: offer.skill,
        description: offer.description,
    });
    state.next_member_id += 1;
    tracing::debug!(name = offer.name, cost = offer.cost, "specialist hired");

    Ok(Event::Hired {
        name: offer.name,
        cost: Money(offer.cost),
    })
}

fn start_project(
    state: &mut AgencyState,
    rules: &RuleSet,
    max_active: usize,
    project_id: Option<u32>,
) -> Outcome {
    let id = project_id.ok_or(Rejection::NoProjectChosen)?;
    let offer = project_offer(id).ok_or(Rejection::UnknownProject(id))?;
    if state.is_active(id) {
        return Err(Rejection::AlreadyActive(offer.name));
    }
    if !state.has_skill(offer.required_skill) {
        return Err(Rejection::MissingSkill(offer.required_skill));
    }
    if state.active_projects.len() >= max_active {
        return Err(Rejection::ProjectLimit(max_active));
    }

    state.active_projects.push(ActiveProject::start(offer));
    tracing::debug!(name = offer.name, days = offer.duration, "project started");

    Ok(Event::ProjectStarted {
        name: offer.name,
        duration: offer.duration,
        period: rules.period,
    })
}

fn boost(state: &mut AgencyState, boost: Option<Boost>, label: &'static str) -> Outcome {
    let boost = boost.ok_or(Rejection::Unavailable(label))?;
    if state.budget < boost.cost {
        return Err(Rejection::InsufficientBudget {
            item: boost.name,
            cost: Money(boost.cost),
            available: Money(state.budget),
        });
    }
    state.budget -= boost.cost;
    state.reputation = clamp_reputation(state.reputation + boost.reputation);
    Ok(Event::Boosted {
        name: boost.name,
        cost: Money(boost.cost),
        reputation: state.reputation,
    })
}

// ── Turn Advancement ─────────────────────────────────────────────────

fn close_period(state: &mut AgencyState, rules: &RuleSet) -> PeriodReport {
    let reputation_before = state.reputation;
    let mut report = PeriodReport {
        period: rules.period,
        turn: state.turn,
        completed: Vec::new(),
        clients_served: 0,
        income: 0,
        upkeep: 0,
        reputation_change: 0,
        idle_penalty: 0,
        summary: None,
    };

    match &rules.work {
        WorkPolicy::SkillMatched {
            reputation_per_completion,
            upkeep_per_head,
            ..
        } => {
            for project in &mut state.active_projects {
                project.days_left = project.days_left.saturating_sub(1);
            }
            let (done, still_active): (Vec<ActiveProject>, Vec<ActiveProject>) =
                std::mem::take(&mut state.active_projects)
                    .into_iter()
                    .partition(|p| p.days_left == 0);
            state.active_projects = still_active;

            report.income = done.iter().map(|p| p.offer.reward).sum();
            report.completed = done.iter().map(|p| p.offer.name).collect();
            state.reputation = clamp_reputation(
                state.reputation + done.len() as i32 * reputation_per_completion,
            );
            report.upkeep = (state.headcount() as i64).saturating_mul(*upkeep_per_head);
        }
        WorkPolicy::CapacityCounted {
            rate_per_client,
            salary_per_head,
            operating_cost,
            idle_penalty,
            ..
        } => {
            report.clients_served = state.open_clients;
            report.income = (state.open_clients as i64).saturating_mul(*rate_per_client);
            report.upkeep = (state.headcount() as i64)
                .saturating_mul(*salary_per_head)
                .saturating_add(*operating_cost);
            if state.open_clients == 0 {
                state.reputation = clamp_reputation(state.reputation - idle_penalty);
                report.idle_penalty = *idle_penalty;
            }
            state.open_clients = 0;
        }
    }

    // Saturate so an extreme rule set can never wrap into a false bankruptcy.
    state.budget = state
        .budget
        .saturating_add(report.income)
        .saturating_sub(report.upkeep);
    state.total_income = state.total_income.saturating_add(report.income);
    state.completed_count += report.completed.len() as u32;
    state.turn += 1;
    report.reputation_change = state.reputation - reputation_before;

    tracing::info!(
        turn = report.turn,
        income = report.income,
        upkeep = report.upkeep,
        budget = state.budget,
        reputation = state.reputation,
        "period closed"
    );

    if let Some(ending) = check_ending(state, rules) {
        state.ending = Some(ending);
        report.summary = Some(Summary {
            ending,
            period: rules.period,
            periods_played: state.turn - 1,
            budget: Money(state.budget),
            reputation: state.reputation,
            completed: state.completed_count,
            headcount: state.headcount(),
        });
        tracing::info!(?ending, "session over");
    }

    report
}

/// First matching condition wins: money, then reputation, then the calendar.
pub fn check_ending(state: &AgencyState, rules: &RuleSet) -> Option<Ending> {
    let staffed = !rules.bankruptcy_requires_staff || !state.roster.is_empty();
    if state.budget <= 0 && staffed {
        Some(Ending::Bankrupt)
    } else if state.reputation <= 0 {
        Some(Ending::Disgraced)
    } else if rules.horizon.is_some_and(|h| state.turn > h) {
        Some(Ending::Survived)
    } else {
        None
    }
}

// ── Queries for the shells ────────────────────────────────────────────

/// How many more clients fit this period. `None` under skill-matched rules.
pub fn client_capacity(state: &AgencyState, rules: &RuleSet) -> Option<u32> {
    match rules.work {
        WorkPolicy::CapacityCounted {
            clients_per_employee,
            ..
        } => Some(state.headcount() * clients_per_employee),
        WorkPolicy::SkillMatched { .. } => None,
    }
}

pub fn max_active_projects(rules: &RuleSet) -> Option<usize> {
    match rules.work {
        WorkPolicy::SkillMatched { max_active, .. } => Some(max_active),
        WorkPolicy::CapacityCounted { .. } => None,
    }
}

/// Costs the agency will be charged at the next boundary.
pub fn upkeep_per_period(state: &AgencyState, rules: &RuleSet) -> i64 {
    let staff = state.headcount() as i64 * rules.cost_per_head();
    match rules.work {
        WorkPolicy::SkillMatched { .. } => staff,
        WorkPolicy::CapacityCounted { operating_cost, .. } => staff + operating_cost,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::agency::state::{project_offer, REPUTATION_CAP};
    use proptest::prelude::*;

    // ── Strategy helpers ──────────────────────────────────

    fn arb_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            (0u32..=6).prop_map(Command::Hire),
            (0u32..=7).prop_map(|id| Command::AcceptWork(Some(id))),
            Just(Command::AcceptWork(None)),
            Just(Command::Market),
            Just(Command::Train),
            Just(Command::EndPeriod),
            Just(Command::EndPeriod),
        ]
    }

    fn arb_rules() -> impl Strategy<Value = RuleSet> {
        prop_oneof![Just(RuleSet::daily()), Just(RuleSet::weekly())]
    }

    proptest! {
        #[test]
        fn prop_reputation_stays_in_bounds(
            rules in arb_rules(),
            commands in prop::collection::vec(arb_command(), 0..120),
        ) {
            let mut s = AgencyState::new(&rules);
            for c in commands {
                s = apply(&s, &rules, c).state;
                prop_assert!((0..=REPUTATION_CAP).contains(&s.reputation), "reputation {}", s.reputation);
            }
        }

        #[test]
        fn prop_active_projects_bounded(commands in prop::collection::vec(arb_command(), 0..120)) {
            let rules = RuleSet::daily();
            let mut s = AgencyState::new(&rules);
            for c in commands {
                s = apply(&s, &rules, c).state;
                prop_assert!(s.active_projects.len() <= 3);
                for p in &s.active_projects {
                    prop_assert!(p.days_left > 0 && p.days_left <= p.offer.duration);
                }
            }
        }

        #[test]
        fn prop_hire_debits_exactly_or_not_at_all(
            budget in 0i64..20_000,
            offer in 1u32..=5,
        ) {
            let rules = RuleSet::daily();
            let mut s = AgencyState::new(&rules);
            s.budget = budget;
            let cost = rules.specialist(offer).unwrap().cost;
            let step = hire(&s, &rules, offer);
            if budget >= cost {
                prop_assert_eq!(step.state.budget, budget - cost);
                prop_assert_eq!(step.state.roster.len(), 1);
            } else {
                prop_assert!(step.outcome.is_err());
                prop_assert_eq!(step.state.budget, budget);
                prop_assert!(step.state.roster.is_empty());
            }
        }

        #[test]
        fn prop_rejections_only_touch_notice(
            rules in arb_rules(),
            commands in prop::collection::vec(arb_command(), 0..80),
        ) {
            let mut s = AgencyState::new(&rules);
            for c in commands {
                let step = apply(&s, &rules, c);
                if step.outcome.is_err() {
                    let mut expected = s.clone();
                    expected.notice = step.state.notice.clone();
                    prop_assert_eq!(&step.state, &expected);
                }
                s = step.state;
            }
        }

        #[test]
        fn prop_income_matches_completed_rewards(
            commands in prop::collection::vec(arb_command(), 0..150),
        ) {
            let rules = RuleSet::daily();
            let mut s = AgencyState::new(&rules);
            let mut rewarded = 0i64;
            let mut completed = 0u32;
            for c in commands {
                let step = apply(&s, &rules, c);
                if let Ok(Event::PeriodClosed(report)) = &step.outcome {
                    for name in &report.completed {
                        let offer = (1..=6)
                            .filter_map(project_offer)
                            .find(|p| p.name == *name)
                            .unwrap();
                        rewarded += offer.reward;
                        completed += 1;
                    }
                }
                s = step.state;
            }
            prop_assert_eq!(s.total_income, rewarded);
            prop_assert_eq!(s.completed_count, completed);
        }

        #[test]
        fn prop_terminal_state_absorbs_everything(
            rules in arb_rules(),
            commands in prop::collection::vec(arb_command(), 0..200),
            after in prop::collection::vec(arb_command(), 1..10),
        ) {
            let mut s = AgencyState::new(&rules);
            for c in commands {
                s = apply(&s, &rules, c).state;
                if s.is_over() {
                    break;
                }
            }
            if s.is_over() {
                for c in after {
                    let step = apply(&s, &rules, c);
                    prop_assert!(matches!(step.outcome, Err(Rejection::GameOver(_))));
                    prop_assert_eq!(&step.state, &s);
                }
            }
        }

        #[test]
        fn prop_money_has_commas_in_place(n in -1_000_000_000i64..1_000_000_000) {
            let text = Money(n).to_string();
            let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(digits, n.unsigned_abs().to_string());
            prop_assert_eq!(text.starts_with('-'), n < 0);
            for group in text.trim_start_matches('-').trim_start_matches('$').split(',').skip(1) {
                prop_assert_eq!(group.len(), 3, "bad grouping in {}", text);
            }
        }
    }
}
