//! What an action produced: an event on success, a rejection otherwise.
//!
//! The `Display` text of both is what the player sees.

use std::fmt;

use thiserror::Error;

use super::rules::Period;
use super::state::{Money, Skill};

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    Bankrupt,
    Disgraced,
    Survived,
}

impl Ending {
    pub fn is_win(self) -> bool {
        matches!(self, Ending::Survived)
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ending::Bankrupt => "Game Over! You ran out of money.",
            Ending::Disgraced => "Game Over! Your reputation is ruined.",
            Ending::Survived => "Congratulations! You survived the full season!",
        })
    }
}

/// Final stats, composed once when the session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub ending: Ending,
    pub period: Period,
    pub periods_played: u32,
    pub budget: Money,
    pub reputation: i32,
    pub completed: u32,
    pub headcount: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Final stats: money {}, reputation {}/100, projects completed {}, employees {}, {}s played {}",
            self.ending,
            self.budget,
            self.reputation,
            self.completed,
            self.headcount,
            self.period.lower(),
            self.periods_played,
        )
    }
}

/// Everything that happened at one turn boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodReport {
    pub period: Period,
    /// The turn that just closed.
    pub turn: u32,
    pub completed: Vec<&'static str>,
    pub clients_served: u32,
    pub income: i64,
    pub upkeep: i64,
    pub reputation_change: i32,
    pub idle_penalty: i32,
    pub summary: Option<Summary>,
}

impl fmt::Display for PeriodReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(summary) = &self.summary {
            return write!(f, "{summary}");
        }
        if !self.completed.is_empty() {
            return write!(
                f,
                "Completed {} project(s)! Earned {}",
                self.completed.len(),
                Money(self.income)
            );
        }
        match self.period {
            Period::Day => write!(
                f,
                "Day {} - Daily costs: {}",
                self.turn + 1,
                Money(self.upkeep)
            ),
            Period::Week => {
                write!(
                    f,
                    "Week {} report: {} client payment(s) {}, costs {}",
                    self.turn,
                    self.clients_served,
                    Money(self.income),
                    Money(self.upkeep)
                )?;
                if self.idle_penalty > 0 {
                    write!(
                        f,
                        ". No active clients - reputation decreased by {}",
                        self.idle_penalty
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// A successful action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Hired { name: &'static str, cost: Money },
    ProjectStarted { name: &'static str, duration: u32, period: Period },
    ClientTaken { rate: Money, reputation: i32 },
    Boosted { name: &'static str, cost: Money, reputation: i32 },
    PeriodClosed(PeriodReport),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Hired { name, cost } => write!(f, "Hired {name} for {cost}!"),
            Event::ProjectStarted {
                name,
                duration,
                period,
            } => write!(
                f,
                "Started project: {name}! Due in {duration} {}(s)",
                period.lower()
            ),
            Event::ClientTaken { rate, reputation } => write!(
                f,
                "Great! You secured a new client project worth {rate}! Reputation is now {reputation}"
            ),
            Event::Boosted {
                name,
                cost,
                reputation,
            } => write!(f, "{name} done for {cost}. Reputation is now {reputation}"),
            Event::PeriodClosed(report) => write!(f, "{report}"),
        }
    }
}

/// A recoverable refusal. State is left as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("The game is over. {0}")]
    GameOver(Ending),

    #[error("No specialist #{0} is available for hire")]
    UnknownSpecialist(u32),

    #[error("No project #{0} is on offer")]
    UnknownProject(u32),

    #[error("Pick a project to start")]
    NoProjectChosen,

    #[error("Not enough budget for {item}! It costs {cost}, you have {available}")]
    InsufficientBudget {
        item: &'static str,
        cost: Money,
        available: Money,
    },

    #[error("You need a specialist with {0} skill!")]
    MissingSkill(Skill),

    #[error("You can only work on {0} projects at a time!")]
    ProjectLimit(usize),

    #[error("{0} is already in progress")]
    AlreadyActive(&'static str),

    #[error("You don't have enough capacity ({clients}/{capacity} clients)! Hire more employees first.")]
    NoCapacity { clients: u32, capacity: u32 },

    #[error("Your reputation is too low to attract clients! ({reputation}, need {required})")]
    ReputationTooLow { reputation: i32, required: i32 },

    #[error("{0} is not available under these rules")]
    Unavailable(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(period: Period) -> PeriodReport {
        PeriodReport {
            period,
            turn: 1,
            completed: Vec::new(),
            clients_served: 0,
            income: 0,
            upkeep: 200,
            reputation_change: 0,
            idle_penalty: 0,
            summary: None,
        }
    }

    #[test]
    fn quiet_day_reports_costs() {
        assert_eq!(report(Period::Day).to_string(), "Day 2 - Daily costs: $200");
    }

    #[test]
    fn completed_projects_lead_the_report() {
        let mut r = report(Period::Day);
        r.completed = vec!["Recommendation Engine"];
        r.income = 16_000;
        assert_eq!(r.to_string(), "Completed 1 project(s)! Earned $16,000");
    }

    #[test]
    fn idle_week_mentions_penalty() {
        let mut r = report(Period::Week);
        r.upkeep = 3_000;
        r.idle_penalty = 5;
        let text = r.to_string();
        assert!(text.starts_with("Week 1 report"), "{text}");
        assert!(text.contains("costs $3,000"), "{text}");
        assert!(text.contains("reputation decreased by 5"), "{text}");
    }

    #[test]
    fn summary_replaces_report() {
        let mut r = report(Period::Week);
        r.summary = Some(Summary {
            ending: Ending::Bankrupt,
            period: Period::Week,
            periods_played: 4,
            budget: Money(-500),
            reputation: 35,
            completed: 0,
            headcount: 3,
        });
        let text = r.to_string();
        assert!(text.starts_with("Game Over! You ran out of money."), "{text}");
        assert!(text.contains("money -$500"), "{text}");
        assert!(text.contains("employees 3"), "{text}");
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            Rejection::MissingSkill(Skill::ComputerVision).to_string(),
            "You need a specialist with Computer Vision skill!"
        );
        let r = Rejection::InsufficientBudget {
            item: "AI Researcher",
            cost: Money(10_000),
            available: Money(9_000),
        };
        assert_eq!(
            r.to_string(),
            "Not enough budget for AI Researcher! It costs $10,000, you have $9,000"
        );
    }

    #[test]
    fn only_survival_is_a_win() {
        assert!(Ending::Survived.is_win());
        assert!(!Ending::Bankrupt.is_win());
        assert!(!Ending::Disgraced.is_win());
    }
}
