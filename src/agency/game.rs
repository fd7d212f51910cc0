//! Dashboard controller: owns the session and maps input onto commands.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::time::NoticeTimer;

use super::actions::*;
use super::logic::{self, Command};
use super::render;
use super::rules::RuleSet;
use super::state::AgencyState;

/// Dashboard views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Team,
    Projects,
    /// Specialist catalog, opened from the Team tab.
    Hire,
}

pub struct AgencyGame {
    pub rules: RuleSet,
    pub state: AgencyState,
    pub screen: Screen,
    banner: NoticeTimer,
}

impl AgencyGame {
    pub fn new(rules: RuleSet) -> Self {
        let state = AgencyState::new(&rules);
        Self {
            rules,
            state,
            screen: Screen::Dashboard,
            banner: NoticeTimer::default(),
        }
    }

    /// Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key(c) => self.handle_key(c),
            InputEvent::Click(id) => self.handle_click(id),
        }
    }

    pub fn banner_visible(&mut self, now_ms: f64) -> bool {
        self.banner.is_visible(&self.state.notice, now_ms)
    }

    pub fn render(
        &self,
        show_banner: bool,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render(self, show_banner, f, area, click_state);
    }

    fn run(&mut self, command: Command) -> bool {
        self.state = logic::apply(&self.state, &self.rules, command).state;
        true
    }

    fn restart(&mut self) {
        tracing::info!("new session");
        self.state = AgencyState::new(&self.rules);
        self.screen = Screen::Dashboard;
        self.banner.reset();
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let over = self.state.is_over();
        match action_id {
            TAB_DASHBOARD => self.go(Screen::Dashboard),
            TAB_TEAM => self.go(Screen::Team),
            TAB_PROJECTS => self.go(Screen::Projects),
            RESTART if over => {
                self.restart();
                true
            }
            _ if over => false,
            NEXT_PERIOD => self.run(Command::EndPeriod),
            OPEN_HIRE => self.go(Screen::Hire),
            CLOSE_HIRE => self.go(Screen::Team),
            TAKE_CLIENT => self.run(Command::AcceptWork(None)),
            RUN_MARKETING => self.run(Command::Market),
            RUN_TRAINING => self.run(Command::Train),
            id if (HIRE_BASE..START_PROJECT_BASE).contains(&id) => {
                self.run(Command::Hire((id - HIRE_BASE) as u32))
            }
            id if self.rules.is_skill_matched()
                && (START_PROJECT_BASE..START_PROJECT_BASE + 20).contains(&id) =>
            {
                self.run(Command::AcceptWork(Some((id - START_PROJECT_BASE) as u32)))
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        let over = self.state.is_over();
        match key {
            'q' => self.back(),
            'd' => self.go(Screen::Dashboard),
            't' => self.go(Screen::Team),
            'p' => self.go(Screen::Projects),
            'r' if over => {
                self.restart();
                true
            }
            _ if over => false,
            'n' => self.run(Command::EndPeriod),
            'h' => self.go(Screen::Hire),
            'c' if !self.rules.is_skill_matched() => self.run(Command::AcceptWork(None)),
            'm' if self.rules.marketing.is_some() => self.run(Command::Market),
            'l' if self.rules.training.is_some() => self.run(Command::Train),
            digit => match (self.screen, digit.to_digit(10)) {
                (Screen::Hire, Some(id)) if id > 0 => self.run(Command::Hire(id)),
                (Screen::Projects, Some(id)) if id > 0 && self.rules.is_skill_matched() => {
                    self.run(Command::AcceptWork(Some(id)))
                }
                _ => false,
            },
        }
    }

    fn go(&mut self, screen: Screen) -> bool {
        self.screen = screen;
        true
    }

    /// One level up. Returns false on the top level so the caller may ignore it.
    fn back(&mut self) -> bool {
        match self.screen {
            Screen::Dashboard => false,
            Screen::Hire => self.go(Screen::Team),
            Screen::Team | Screen::Projects => self.go(Screen::Dashboard),
        }
    }
}
