//! Line-oriented menu shell for native builds.
//!
//! Generic over `BufRead`/`Write` so tests can script a whole session.

use std::io::{self, BufRead, Write};

use crate::agency::logic::{self, Command};
use crate::agency::outcome::{Event, PeriodReport};
use crate::agency::rules::{Boost, Period, RuleSet, WorkPolicy};
use crate::agency::state::{AgencyState, Money, PROJECTS};

pub const INVALID_CHOICE: &str = "Invalid choice. Please enter a number between 1 and 6.";
const GOODBYE: &str = "Thanks for playing! Goodbye.";
const RULE: &str = "==================================================";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    AcceptWork,
    Hire,
    Marketing,
    Training,
    EndPeriod,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AcceptWork),
            "2" => Some(Self::Hire),
            "3" => Some(Self::Marketing),
            "4" => Some(Self::Training),
            "5" => Some(Self::EndPeriod),
            "6" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Result of resolving a menu choice into a command.
enum Prompted {
    Command(Command),
    Cancelled,
    Eof,
}

/// Play one session to completion or until the player quits.
///
/// Returns the final state. In-game endings are not errors; only IO
/// failures are.
pub fn run<R: BufRead, W: Write>(
    rules: &RuleSet,
    mut input: R,
    out: &mut W,
) -> io::Result<AgencyState> {
    let mut state = AgencyState::new(rules);
    tracing::info!(mode = ?rules.mode, "session started");
    writeln!(out, "Welcome to AI Agency Simulator!")?;

    loop {
        write_stats(out, &state, rules)?;
        write_menu(out, rules)?;
        write!(out, "Enter your choice (1-6): ")?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out, "\n{GOODBYE}")?;
            break;
        };
        let command = match MenuChoice::parse(&line) {
            None => {
                writeln!(out, "\n{INVALID_CHOICE}")?;
                continue;
            }
            Some(MenuChoice::Quit) => {
                writeln!(out, "\n{GOODBYE}")?;
                break;
            }
            Some(choice) => match resolve(choice, &state, rules, &mut input, out)? {
                Prompted::Command(command) => command,
                Prompted::Cancelled => continue,
                Prompted::Eof => {
                    writeln!(out, "\n{GOODBYE}")?;
                    break;
                }
            },
        };

        let step = logic::apply(&state, rules, command);
        if let Ok(Event::PeriodClosed(report)) = &step.outcome {
            write_report(out, report)?;
        }
        state = step.state;
        writeln!(out, "\n{}", state.notice.text)?;

        if state.is_over() {
            break;
        }
    }

    tracing::info!(
        turn = state.turn,
        ending = ?state.ending,
        won = state.ending.is_some_and(|e| e.is_win()),
        "session finished"
    );
    Ok(state)
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn resolve<R: BufRead, W: Write>(
    choice: MenuChoice,
    state: &AgencyState,
    rules: &RuleSet,
    input: &mut R,
    out: &mut W,
) -> io::Result<Prompted> {
    let command = match choice {
        MenuChoice::AcceptWork if rules.is_skill_matched() => {
            write_projects(out, state)?;
            return pick(input, out, "Enter project number", |id| {
                Command::AcceptWork(Some(id))
            });
        }
        MenuChoice::AcceptWork => Command::AcceptWork(None),
        MenuChoice::Hire if rules.specialists().len() > 1 => {
            writeln!(out, "\nAvailable specialists:")?;
            for offer in rules.specialists() {
                writeln!(
                    out,
                    "  {}. {} - {} ({}): {}",
                    offer.id,
                    offer.name,
                    Money(offer.cost),
                    offer.skill,
                    offer.description
                )?;
            }
            return pick(input, out, "Enter specialist number", Command::Hire);
        }
        MenuChoice::Hire => Command::Hire(rules.specialists().first().map_or(0, |s| s.id)),
        MenuChoice::Marketing => Command::Market,
        MenuChoice::Training => Command::Train,
        MenuChoice::EndPeriod => Command::EndPeriod,
        MenuChoice::Quit => return Ok(Prompted::Eof),
    };
    Ok(Prompted::Command(command))
}

fn pick<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    to_command: impl FnOnce(u32) -> Command,
) -> io::Result<Prompted> {
    write!(out, "{prompt} (blank to cancel): ")?;
    out.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(Prompted::Eof);
    };
    if line.is_empty() {
        return Ok(Prompted::Cancelled);
    }
    match line.parse::<u32>() {
        Ok(id) => Ok(Prompted::Command(to_command(id))),
        Err(_) => {
            writeln!(out, "\nPlease enter a number from the list.")?;
            Ok(Prompted::Cancelled)
        }
    }
}

fn write_stats<W: Write>(out: &mut W, state: &AgencyState, rules: &RuleSet) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "{} {} - AI Agency Dashboard", rules.period.name(), state.turn)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Money: {}", Money(state.budget))?;
    writeln!(out, "Reputation: {}/100", state.reputation)?;
    writeln!(out, "Employees: {}", state.headcount())?;
    writeln!(
        out,
        "Upkeep: {}/{}",
        Money(logic::upkeep_per_period(state, rules)),
        rules.period.lower()
    )?;
    match logic::max_active_projects(rules) {
        Some(max) => {
            writeln!(out, "Active Projects: {}/{max}", state.active_projects.len())?;
            for p in &state.active_projects {
                writeln!(
                    out,
                    "  - {} ({} {}(s) left)",
                    p.offer.name,
                    p.days_left,
                    rules.period.lower()
                )?;
            }
            writeln!(out, "Completed Projects: {}", state.completed_count)?;
        }
        None => {
            let capacity = logic::client_capacity(state, rules).unwrap_or(0);
            writeln!(out, "Active Clients: {}/{capacity}", state.open_clients)?;
        }
    }
    writeln!(out, "{RULE}\n")
}

fn write_menu<W: Write>(out: &mut W, rules: &RuleSet) -> io::Result<()> {
    writeln!(out, "What would you like to do?")?;
    match &rules.work {
        WorkPolicy::SkillMatched { .. } => {
            writeln!(out, "1. Start a project (needs a matching specialist)")?;
            writeln!(out, "2. Hire a specialist")?;
        }
        WorkPolicy::CapacityCounted {
            rate_per_client,
            reputation_per_client,
            salary_per_head,
            clients_per_employee,
            ..
        } => {
            writeln!(
                out,
                "1. Take on a new client project ({}, +{} reputation)",
                Money(*rate_per_client),
                reputation_per_client
            )?;
            let hire_cost = rules.specialists().first().map_or(0, |s| s.cost);
            writeln!(
                out,
                "2. Hire an employee ({}, {}/week, +{} client capacity)",
                Money(hire_cost),
                Money(*salary_per_head),
                clients_per_employee
            )?;
        }
    }
    writeln!(out, "3. {}", boost_label("Invest in marketing", rules.marketing))?;
    writeln!(out, "4. {}", boost_label("Train your team", rules.training))?;
    match rules.period {
        Period::Day => writeln!(out, "5. End day")?,
        Period::Week => writeln!(out, "5. End week and collect payments")?,
    }
    writeln!(out, "6. Quit game\n")
}

fn boost_label(label: &str, boost: Option<Boost>) -> String {
    match boost {
        Some(b) => format!("{label} ({}, +{} reputation)", Money(b.cost), b.reputation),
        None => format!("{label} (not available)"),
    }
}

fn write_projects<W: Write>(out: &mut W, state: &AgencyState) -> io::Result<()> {
    writeln!(out, "\nAvailable projects:")?;
    for p in &PROJECTS {
        let status = if state.is_active(p.id) {
            " - in progress"
        } else if !state.has_skill(p.required_skill) {
            " - no specialist"
        } else {
            ""
        };
        writeln!(
            out,
            "  {}. {} - {}, {} day(s), {}, needs {}{status}",
            p.id,
            p.name,
            Money(p.reward),
            p.duration,
            p.difficulty.name(),
            p.required_skill
        )?;
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &PeriodReport) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "End of {} {} Report", report.period.name(), report.turn)?;
    writeln!(out, "{RULE}")?;
    for name in &report.completed {
        writeln!(out, "Completed: {name}")?;
    }
    if report.clients_served > 0 || report.completed.is_empty() {
        writeln!(out, "Payments received: {}", Money(report.income))?;
    } else {
        writeln!(out, "Project rewards: {}", Money(report.income))?;
    }
    writeln!(out, "Costs paid: {}", Money(-report.upkeep))?;
    writeln!(out, "Reputation change: {:+}", report.reputation_change)?;
    if report.idle_penalty > 0 {
        writeln!(
            out,
            "No active clients - reputation decreased by {}",
            report.idle_penalty
        )?;
    }
    writeln!(out, "{RULE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agency::outcome::Ending;

    fn play(rules: &RuleSet, script: &str) -> (AgencyState, String) {
        let mut out = Vec::new();
        let state = run(rules, script.as_bytes(), &mut out).unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn menu_choice_parsing() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AcceptWork));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("one"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    // Scenario A
    #[test]
    fn daily_recommendation_engine_session() {
        let (state, out) = play(&RuleSet::daily(), "2\n1\n1\n5\n5\n5\n5\n6\n");
        assert_eq!(state.budget, 57_400);
        assert_eq!(state.reputation, 55);
        assert_eq!(state.completed_count, 1);
        assert!(out.contains("Hired ML Engineer for $8,000!"));
        assert!(out.contains("Started project: Recommendation Engine! Due in 3 day(s)"));
        assert!(out.contains("Completed 1 project(s)! Earned $16,000"));
        assert!(out.contains("Day 4 - AI Agency Dashboard"));
        assert!(out.contains("Money: $57,400"));
        assert!(out.contains("Upkeep: $200/day"));
        assert!(out.contains("Reputation change: +5"));
        assert!(out.ends_with("Thanks for playing! Goodbye.\n"));
    }

    // Scenario B
    #[test]
    fn weekly_client_session() {
        let (state, out) = play(&RuleSet::weekly(), "1\n5\n6\n");
        assert_eq!(state.budget, 12_000);
        assert_eq!(state.reputation, 60);
        assert_eq!(state.turn, 2);
        assert!(out.contains("Week 1 - AI Agency Dashboard"));
        assert!(out.contains("Great! You secured a new client project worth $5,000!"));
        assert!(out.contains("End of Week 1 Report"));
        assert!(out.contains("Week 2 - AI Agency Dashboard"));
        assert!(out.contains("Money: $12,000"));
        assert!(out.contains("Active Clients: 0/2"));
        assert!(out.contains("Upkeep: $3,000/week"));
        assert!(out.contains("Reputation change: +0"));
    }

    #[test]
    fn invalid_choice_reprompts_without_change() {
        let (state, out) = play(&RuleSet::weekly(), "9\nabc\n\n6\n");
        assert_eq!(out.matches(INVALID_CHOICE).count(), 3);
        assert_eq!(state, AgencyState::new(&RuleSet::weekly()));
    }

    #[test]
    fn eof_counts_as_quit() {
        let (state, out) = play(&RuleSet::daily(), "");
        assert_eq!(state.turn, 1);
        assert!(out.contains(GOODBYE));

        // EOF inside a catalog prompt as well.
        let (state, out) = play(&RuleSet::daily(), "2\n");
        assert!(state.roster.is_empty());
        assert!(out.contains(GOODBYE));
    }

    #[test]
    fn blank_catalog_pick_cancels() {
        let (state, out) = play(&RuleSet::daily(), "2\n\n6\n");
        assert!(state.roster.is_empty());
        assert_eq!(state.notice.seq, 0);
        assert!(out.contains("Available specialists:"));
    }

    #[test]
    fn rejection_is_printed() {
        let (state, out) = play(&RuleSet::daily(), "1\n2\n6\n");
        assert!(state.active_projects.is_empty());
        assert!(out.contains("You need a specialist with Computer Vision skill!"));
    }

    #[test]
    fn bankruptcy_ends_the_session() {
        let (state, out) = play(&RuleSet::weekly(), "5\n5\n5\n5\n5\n5\n");
        assert_eq!(state.ending, Some(Ending::Bankrupt));
        assert_eq!(state.turn, 5);
        assert_eq!(state.budget, -2_000);
        assert!(out.contains("Game Over! You ran out of money."));
        assert!(out.contains("weeks played 4"));
        assert!(!out.contains(GOODBYE));
    }

    #[test]
    fn daily_menu_marks_boosts_unavailable() {
        let (_, out) = play(&RuleSet::daily(), "3\n6\n");
        assert!(out.contains("3. Invest in marketing (not available)"));
        assert!(out.contains("Marketing is not available under these rules"));
    }
}
