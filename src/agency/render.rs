//! Dashboard rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::{client_capacity, max_active_projects, upkeep_per_period};
use super::rules::{Boost, Period, RuleSet};
use super::state::{AgencyState, Money, PROJECTS};
use super::{AgencyGame, Screen};

const BAR_WIDTH: usize = 12;

pub fn render(
    game: &AgencyGame,
    show_banner: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let borders = if narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                                // Header
            Constraint::Length(if show_banner { 3 } else { 0 }), // Banner
            Constraint::Length(3),                                // Tabs
            Constraint::Min(6),                                   // Content
        ])
        .split(area);

    render_header(game, f, chunks[0], borders);
    if show_banner {
        render_banner(&game.state, f, chunks[1], borders);
    }
    render_tabs(game, f, chunks[2], borders, click_state);

    if game.state.is_over() {
        render_game_over(&game.state, f, chunks[3], borders, click_state);
        return;
    }
    match game.screen {
        Screen::Dashboard => render_dashboard(game, f, chunks[3], borders, click_state),
        Screen::Team => render_team(&game.state, f, chunks[3], borders, click_state),
        Screen::Hire => render_hire(game, f, chunks[3], borders, click_state),
        Screen::Projects => render_projects(game, f, chunks[3], borders, click_state),
    }
}

// ── Header / Banner / Tabs ─────────────────────────────────────────────

fn render_header(game: &AgencyGame, f: &mut Frame, area: Rect, borders: Borders) {
    let s = &game.state;
    let label = Style::default().fg(Color::Gray);
    let budget_color = if s.budget > 0 { Color::Yellow } else { Color::Red };

    let clock = match game.rules.horizon {
        Some(h) => format!("{} {}/{}", game.rules.period.name(), s.turn, h),
        None => format!("{} {}", game.rules.period.name(), s.turn),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Budget: ", label),
            Span::styled(
                Money(s.budget).to_string(),
                Style::default()
                    .fg(budget_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Reputation: ", label),
            Span::styled(
                format!("{}/100", s.reputation),
                Style::default().fg(reputation_color(s.reputation)),
            ),
            Span::styled(format!("  {clock}"), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" Team: ", label),
            Span::styled(s.headcount().to_string(), Style::default().fg(Color::Cyan)),
            Span::styled("  Upkeep: ", label),
            Span::styled(
                format!(
                    "{}/{}",
                    Money(upkeep_per_period(s, &game.rules)),
                    game.rules.period.lower()
                ),
                Style::default().fg(Color::White),
            ),
            Span::styled("  Earned: ", label),
            Span::styled(
                Money(s.total_income).to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " AI Agency ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_banner(state: &AgencyState, f: &mut Frame, area: Rect, borders: Borders) {
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(Line::from(Span::styled(
        format!(" {}", state.notice.text),
        Style::default().fg(Color::Yellow),
    )))
    .wrap(Wrap { trim: true })
    .block(block);
    f.render_widget(widget, area);
}

fn render_tabs(
    game: &AgencyGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let team = format!("Team ({})", game.state.roster.len());
    let projects = match max_active_projects(&game.rules) {
        Some(max) => format!("Projects ({}/{max})", game.state.active_projects.len()),
        None => format!("Clients ({})", game.state.open_clients),
    };
    let active = match game.screen {
        Screen::Dashboard => TAB_DASHBOARD,
        Screen::Team | Screen::Hire => TAB_TEAM,
        Screen::Projects => TAB_PROJECTS,
    };

    let mut cs = click_state.borrow_mut();
    TabBar::new()
        .tab("Dashboard", TAB_DASHBOARD)
        .tab(&team, TAB_TEAM)
        .tab(&projects, TAB_PROJECTS)
        .active(active)
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut cs);
}

// ── Dashboard ──────────────────────────────────────────────────────────

fn render_dashboard(
    game: &AgencyGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let rules = &game.rules;
    let mut cl = ClickableList::new();

    match max_active_projects(rules) {
        Some(max) => {
            cl.push(stat_line(
                "Active projects",
                format!("{}/{max}", s.active_projects.len()),
            ));
            cl.push(stat_line("Completed", s.completed_count.to_string()));
        }
        None => {
            let capacity = client_capacity(s, rules).unwrap_or(0);
            cl.push(stat_line(
                "Clients this week",
                format!("{}/{capacity}", s.open_clients),
            ));
        }
    }
    cl.push(Line::from(Span::styled(
        format!(" {}", rules_blurb(rules)),
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(""));

    cl.push_clickable(
        action_line('N', &format!("Next {}", rules.period.lower()), Color::Green),
        NEXT_PERIOD,
    );
    if !rules.is_skill_matched() {
        cl.push_clickable(action_line('C', "Take a client", Color::Cyan), TAKE_CLIENT);
    }
    if let Some(boost) = rules.marketing {
        cl.push_clickable(boost_line('M', boost, s.budget), RUN_MARKETING);
    }
    if let Some(boost) = rules.training {
        cl.push_clickable(boost_line('L', boost, s.budget), RUN_TRAINING);
    }
    cl.push_clickable(action_line('H', "Hire", Color::Cyan), OPEN_HIRE);

    draw_list(cl, " Dashboard ", f, area, borders, click_state);
}

fn rules_blurb(rules: &RuleSet) -> String {
    match rules.period {
        Period::Day => format!(
            "Match projects to your team's skills. Staff cost {}/day.",
            Money(rules.cost_per_head())
        ),
        Period::Week => format!(
            "Each employee handles two clients a week. Survive {} weeks.",
            rules.horizon.unwrap_or_default()
        ),
    }
}

// ── Team / Hire ────────────────────────────────────────────────────────

fn render_team(
    state: &AgencyState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    if state.founders > 0 {
        cl.push(Line::from(Span::styled(
            format!(" Founders: {}", state.founders),
            Style::default().fg(Color::Gray),
        )));
    }
    if state.roster.is_empty() {
        cl.push(Line::from(Span::styled(
            " Nobody hired yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for member in &state.roster {
        cl.push(Line::from(vec![
            Span::styled(
                format!(" #{:<3}", member.id),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(member.name, Style::default().fg(Color::White)),
            Span::styled(
                format!("  {}", member.skill),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }
    cl.push(Line::from(""));
    cl.push_clickable(action_line('H', "Hire specialist", Color::Cyan), OPEN_HIRE);

    draw_list(cl, " Team ", f, area, borders, click_state);
}

fn render_hire(
    game: &AgencyGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for offer in game.rules.specialists() {
        let affordable = game.state.budget >= offer.cost;
        let name_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![
            Span::styled(
                format!(" [{}] ", offer.id),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(offer.name, name_style),
            Span::styled(
                format!("  {}", Money(offer.cost)),
                Style::default().fg(if affordable { Color::Green } else { Color::Red }),
            ),
            Span::styled(
                format!("  {}", offer.skill),
                Style::default().fg(Color::Cyan),
            ),
        ];
        if !affordable {
            spans.push(Span::styled(
                "  (can't afford)",
                Style::default().fg(Color::Red),
            ));
        }
        cl.push_clickable(Line::from(spans), HIRE_BASE + offer.id as u16);
    }
    cl.push(Line::from(""));
    cl.push_clickable(action_line('Q', "Back", Color::Gray), CLOSE_HIRE);

    draw_list(cl, " Hire ", f, area, borders, click_state);
}

// ── Projects ───────────────────────────────────────────────────────────

fn render_projects(
    game: &AgencyGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let s = &game.state;
    let period = game.rules.period.lower();
    let mut cl = ClickableList::new();

    if !game.rules.is_skill_matched() {
        let capacity = client_capacity(s, &game.rules).unwrap_or(0);
        cl.push(stat_line(
            "Open clients",
            format!("{}/{capacity}", s.open_clients),
        ));
        cl.push(Line::from(""));
        cl.push_clickable(action_line('C', "Take a client", Color::Cyan), TAKE_CLIENT);
        draw_list(cl, " Clients ", f, area, borders, click_state);
        return;
    }

    cl.push(section_title("Active"));
    if s.active_projects.is_empty() {
        cl.push(Line::from(Span::styled(
            "  none",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for project in &s.active_projects {
        cl.push(Line::from(vec![
            Span::styled(
                format!("  {} ", project.offer.name),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                progress_bar(project.progress(), BAR_WIDTH),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!(" {} {period}(s) left", project.days_left),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    cl.push(Line::from(""));
    cl.push(section_title("Available"));
    for offer in &PROJECTS {
        if s.is_active(offer.id) {
            cl.push(Line::from(Span::styled(
                format!("  -  {} (in progress)", offer.name),
                Style::default().fg(Color::DarkGray),
            )));
            continue;
        }
        let (mark, mark_color) = if s.has_skill(offer.required_skill) {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", offer.id),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(offer.name, Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}", Money(offer.reward)),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("  {} {period}s  {}  ", offer.duration, offer.difficulty.name()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(mark, Style::default().fg(mark_color)),
                Span::styled(
                    format!(" {}", offer.required_skill),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            START_PROJECT_BASE + offer.id as u16,
        );
    }

    draw_list(cl, " Projects ", f, area, borders, click_state);
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// ── Game Over ──────────────────────────────────────────────────────────

fn render_game_over(
    state: &AgencyState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(ending) = state.ending else {
        return;
    };
    let color = if ending.is_win() {
        Color::Green
    } else {
        Color::Red
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {ending}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(stat_line("Final budget", Money(state.budget).to_string()));
    cl.push(stat_line("Reputation", format!("{}/100", state.reputation)));
    cl.push(stat_line("Projects completed", state.completed_count.to_string()));
    cl.push(stat_line("Employees", state.headcount().to_string()));
    cl.push(stat_line("Total earned", Money(state.total_income).to_string()));
    cl.push(Line::from(""));
    cl.push_clickable(action_line('R', "Play again", Color::Green), RESTART);

    draw_list(cl, " Game Over ", f, area, borders, click_state);
}

// ── Helpers ────────────────────────────────────────────────────────────

fn draw_list(
    cl: ClickableList<'_>,
    title: &str,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1);
    }
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White),
        ));
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn section_title(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {text}"),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
}

fn action_line(key: char, label: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" [{key}] "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(label.to_string(), Style::default().fg(color)),
    ])
}

fn boost_line(key: char, boost: Boost, budget: i64) -> Line<'static> {
    let color = if budget >= boost.cost {
        Color::White
    } else {
        Color::DarkGray
    };
    let mut line = action_line(key, boost.name, color);
    line.spans.push(Span::styled(
        format!("  {}  +{} rep", Money(boost.cost), boost.reputation),
        Style::default().fg(Color::Gray),
    ));
    line
}

fn reputation_color(reputation: i32) -> Color {
    if reputation >= 70 {
        Color::Green
    } else if reputation >= 30 {
        Color::Yellow
    } else {
        Color::Red
    }
}
