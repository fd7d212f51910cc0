//! Agency state and the static catalogs it draws from.

use std::fmt;

use super::outcome::Ending;
use super::rules::RuleSet;

/// Upper bound for reputation.
pub const REPUTATION_CAP: i32 = 100;

/// Skills a specialist brings and a project requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skill {
    MachineLearning,
    NaturalLanguageProcessing,
    ComputerVision,
    DataAnalysis,
    Research,
    GeneralAi,
}

impl Skill {
    pub fn name(self) -> &'static str {
        match self {
            Skill::MachineLearning => "Machine Learning",
            Skill::NaturalLanguageProcessing => "Natural Language Processing",
            Skill::ComputerVision => "Computer Vision",
            Skill::DataAnalysis => "Data Analysis",
            Skill::Research => "Research",
            Skill::GeneralAi => "General AI",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A hireable specialist. Catalog data, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialistOffer {
    pub id: u32,
    pub name: &'static str,
    pub cost: i64,
    pub skill: Skill,
    pub description: &'static str,
}

/// A contract the agency can take on. Catalog data, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectOffer {
    pub id: u32,
    pub name: &'static str,
    pub reward: i64,
    pub required_skill: Skill,
    pub duration: u32,
    pub description: &'static str,
    pub difficulty: Difficulty,
}

pub const SPECIALISTS: [SpecialistOffer; 5] = [
    SpecialistOffer {
        id: 1,
        name: "ML Engineer",
        cost: 8_000,
        skill: Skill::MachineLearning,
        description: "Expert in training and deploying ML models",
    },
    SpecialistOffer {
        id: 2,
        name: "NLP Specialist",
        cost: 9_000,
        skill: Skill::NaturalLanguageProcessing,
        description: "Specializes in text analysis and language models",
    },
    SpecialistOffer {
        id: 3,
        name: "Computer Vision Expert",
        cost: 9_500,
        skill: Skill::ComputerVision,
        description: "Expert in image and video analysis",
    },
    SpecialistOffer {
        id: 4,
        name: "Data Scientist",
        cost: 7_500,
        skill: Skill::DataAnalysis,
        description: "Analyzes data and builds predictive models",
    },
    SpecialistOffer {
        id: 5,
        name: "AI Researcher",
        cost: 10_000,
        skill: Skill::Research,
        description: "Develops cutting-edge AI solutions",
    },
];

/// The only role on offer under weekly rules.
pub const GENERALISTS: [SpecialistOffer; 1] = [SpecialistOffer {
    id: 1,
    name: "AI Specialist",
    cost: 3_000,
    skill: Skill::GeneralAi,
    description: "Adds room for two more clients a week",
}];

pub const PROJECTS: [ProjectOffer; 6] = [
    ProjectOffer {
        id: 1,
        name: "Sentiment Analysis Tool",
        reward: 15_000,
        required_skill: Skill::NaturalLanguageProcessing,
        duration: 3,
        description: "Build a tool to analyze customer sentiment from reviews",
        difficulty: Difficulty::Medium,
    },
    ProjectOffer {
        id: 2,
        name: "Image Classification System",
        reward: 18_000,
        required_skill: Skill::ComputerVision,
        duration: 4,
        description: "Create a system to classify product images automatically",
        difficulty: Difficulty::Hard,
    },
    ProjectOffer {
        id: 3,
        name: "Sales Prediction Model",
        reward: 12_000,
        required_skill: Skill::DataAnalysis,
        duration: 2,
        description: "Develop a model to predict future sales trends",
        difficulty: Difficulty::Easy,
    },
    ProjectOffer {
        id: 4,
        name: "Chatbot Development",
        reward: 14_000,
        required_skill: Skill::NaturalLanguageProcessing,
        duration: 3,
        description: "Build an intelligent customer service chatbot",
        difficulty: Difficulty::Medium,
    },
    ProjectOffer {
        id: 5,
        name: "Recommendation Engine",
        reward: 16_000,
        required_skill: Skill::MachineLearning,
        duration: 3,
        description: "Create a personalized product recommendation system",
        difficulty: Difficulty::Medium,
    },
    ProjectOffer {
        id: 6,
        name: "Fraud Detection System",
        reward: 20_000,
        required_skill: Skill::MachineLearning,
        duration: 5,
        description: "Build a system to detect fraudulent transactions",
        difficulty: Difficulty::Hard,
    },
];

pub fn project_offer(id: u32) -> Option<&'static ProjectOffer> {
    PROJECTS.iter().find(|p| p.id == id)
}

/// A hired specialist. The hire cost is not retained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterMember {
    pub id: u64,
    pub name: &'static str,
    pub skill: Skill,
    pub description: &'static str,
}

/// An accepted project counting down to delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveProject {
    pub offer: ProjectOffer,
    pub days_left: u32,
}

impl ActiveProject {
    pub fn start(offer: &ProjectOffer) -> Self {
        Self {
            offer: *offer,
            days_left: offer.duration,
        }
    }

    /// Fraction of the work done, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        if self.offer.duration == 0 {
            return 1.0;
        }
        (self.offer.duration - self.days_left) as f64 / self.offer.duration as f64
    }
}

/// The last outcome message. `seq` bumps on every post so a shell can tell a
/// fresh message from a stale one with the same text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub seq: u64,
    pub turn: u32,
}

/// Whole-session snapshot. Owned by the shell, replaced by each transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyState {
    pub budget: i64,
    pub reputation: i32,
    pub turn: u32,
    /// Staff on the books from day one without a roster entry.
    pub founders: u32,
    pub roster: Vec<RosterMember>,
    pub active_projects: Vec<ActiveProject>,
    pub open_clients: u32,
    pub completed_count: u32,
    pub total_income: i64,
    pub next_member_id: u64,
    pub ending: Option<Ending>,
    pub notice: Notice,
}

impl AgencyState {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            budget: rules.starting_budget,
            reputation: clamp_reputation(rules.starting_reputation),
            turn: 1,
            founders: rules.founders,
            roster: Vec::new(),
            active_projects: Vec::new(),
            open_clients: 0,
            completed_count: 0,
            total_income: 0,
            next_member_id: 1,
            ending: None,
            notice: Notice::default(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    pub fn headcount(&self) -> u32 {
        self.founders + self.roster.len() as u32
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.roster.iter().any(|m| m.skill == skill)
    }

    pub fn is_active(&self, project_id: u32) -> bool {
        self.active_projects.iter().any(|p| p.offer.id == project_id)
    }

    pub fn post(&mut self, text: impl Into<String>) {
        self.notice = Notice {
            text: text.into(),
            seq: self.notice.seq + 1,
            turn: self.turn,
        };
    }
}

pub fn clamp_reputation(value: i32) -> i32 {
    value.clamp(0, REPUTATION_CAP)
}

/// Whole-dollar amount rendered as `$12,345` / `-$1,000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Money(pub i64);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-${grouped}")
        } else {
            write!(f, "${grouped}")
        }
    }
}
