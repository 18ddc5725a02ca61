//! Agent field rules.
//!
//! Every rule runs, so callers receive all field errors at once.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::agents::{
    data::{AgentUpdate, NewAgent},
    records::{AgentStatus, Department},
};

/// Longest accepted status change reason, in characters.
pub const MAX_REASON_CHARS: usize = 200;

const NAME_CHARS: (usize, usize) = (2, 100);
const SKILL_CHARS: (usize, usize) = (2, 50);

#[expect(clippy::expect_used, reason = "pattern is a fixed literal")]
static AGENT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d{3}$").expect("agent code pattern should compile"));

#[expect(clippy::expect_used, reason = "pattern is a fixed literal")]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
});

/// A rule violation on a single request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidAgent {
    pub agent_code: String,
    pub name: String,
    pub email: String,
    pub department: Department,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ValidUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<Department>,
    pub skills: Option<Vec<String>>,
}

#[must_use]
pub fn validate_agent_code(code: &str) -> bool {
    AGENT_CODE_RE.is_match(code)
}

#[derive(Debug, Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn name(&mut self, name: &str) {
        let chars = name.trim().chars().count();

        if chars < NAME_CHARS.0 {
            self.push("name", "Name must be at least 2 characters");
        } else if chars > NAME_CHARS.1 {
            self.push("name", "Name cannot exceed 100 characters");
        }
    }

    fn email(&mut self, email: &str) {
        if !EMAIL_RE.is_match(email) {
            self.push("email", "Please provide a valid email address");
        }
    }

    fn department(&mut self, department: &str) -> Department {
        department.parse().unwrap_or_else(|_| {
            self.push(
                "department",
                "Department must be one of: General, Sales, Support, Technical, Billing",
            );

            Department::default()
        })
    }

    fn skills(&mut self, skills: Vec<String>) -> Vec<String> {
        let mut distinct: Vec<String> = Vec::with_capacity(skills.len());

        for skill in skills {
            let chars = skill.chars().count();

            if chars < SKILL_CHARS.0 || chars > SKILL_CHARS.1 {
                self.push("skills", "Each skill must be between 2 and 50 characters");
            } else if !distinct.contains(&skill) {
                distinct.push(skill);
            }
        }

        distinct
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

pub(crate) fn validate_new_agent(agent: NewAgent) -> Result<ValidAgent, Vec<FieldError>> {
    let mut errors = Collector::default();

    if agent.agent_code.is_empty() {
        errors.push("agentCode", "Agent code is required");
    } else if !validate_agent_code(&agent.agent_code) {
        errors.push(
            "agentCode",
            "Agent code must be in format A001 (letter + 3 digits)",
        );
    }

    if agent.name.is_empty() {
        errors.push("name", "Name is required");
    } else {
        errors.name(&agent.name);
    }

    if agent.email.is_empty() {
        errors.push("email", "Email is required");
    } else {
        errors.email(&agent.email);
    }

    let department = agent
        .department
        .map_or_else(Department::default, |department| {
            errors.department(&department)
        });

    let skills = errors.skills(agent.skills.unwrap_or_default());

    errors.finish(ValidAgent {
        agent_code: agent.agent_code,
        name: agent.name.trim().to_string(),
        email: agent.email,
        department,
        skills,
    })
}

pub(crate) fn validate_update(update: AgentUpdate) -> Result<ValidUpdate, Vec<FieldError>> {
    let mut errors = Collector::default();

    if let Some(name) = &update.name {
        errors.name(name);
    }

    if let Some(email) = &update.email {
        errors.email(email);
    }

    let department = update
        .department
        .map(|department| errors.department(&department));

    let skills = update.skills.map(|skills| errors.skills(skills));

    errors.finish(ValidUpdate {
        name: update.name.map(|name| name.trim().to_string()),
        email: update.email,
        department,
        skills,
    })
}

pub(crate) fn validate_reason(reason: Option<&str>) -> Result<(), Vec<FieldError>> {
    let mut errors = Collector::default();

    if reason.is_some_and(|reason| reason.chars().count() > MAX_REASON_CHARS) {
        errors.push("reason", "Reason cannot exceed 200 characters");
    }

    errors.finish(())
}

pub(crate) fn parse_status(status: &str) -> Option<AgentStatus> {
    status.parse().ok()
}
