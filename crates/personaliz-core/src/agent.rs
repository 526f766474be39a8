//! Agent drafts and the built-in agent templates.
//!
//! Agents themselves are stored elsewhere; this module only turns free text
//! or a template into the descriptor a store would persist.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Longest name derived from a prompt, in characters.
const MAX_NAME_CHARS: usize = 60;

/// Five-field cron expression embedded in free text.
static CRON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|\s)((?:\*|[0-5]?\d)\s+(?:\*|2[0-3]|[01]?\d)\s+(?:\*|3[01]|[12]\d|[1-9])\s+(?:\*|1[0-2]|0?[1-9])\s+(?:\*|[0-6]))(?:\s|$|[.,;])",
    )
    .expect("cron pattern is valid")
});

/// Descriptor of a scheduled automation agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDraft {
    pub name: String,
    pub role: String,
    pub goal: String,
    /// One of `commenter`, `monitor`, `briefing`, `custom`.
    pub action_type: String,
    /// Five-field cron expression, empty when none was detected.
    pub schedule_cron: String,
    pub active: bool,
    pub sandbox: bool,
}

/// A ready-made agent users can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub action_type: &'static str,
    pub schedule_cron: &'static str,
}

impl AgentTemplate {
    /// Look up a template by key.
    pub fn find(key: &str) -> Option<&'static AgentTemplate> {
        AGENT_TEMPLATES.iter().find(|t| t.key == key)
    }

    /// Instantiate the template as an active agent.
    pub fn to_draft(&self, sandbox: bool) -> AgentDraft {
        AgentDraft {
            name: self.name.to_string(),
            role: self.role.to_string(),
            goal: self.goal.to_string(),
            action_type: self.action_type.to_string(),
            schedule_cron: self.schedule_cron.to_string(),
            active: true,
            sandbox,
        }
    }
}

pub static AGENT_TEMPLATES: &[AgentTemplate] = &[
    AgentTemplate {
        key: "trending_openclaw_daily",
        name: "Trending OpenClaw Daily",
        role: "trend scout",
        goal: "Check latest OpenClaw discussions and summarize action points.",
        action_type: "monitor",
        schedule_cron: "0 9 * * *",
    },
    AgentTemplate {
        key: "hashtag_commenter_hourly",
        name: "Hashtag Commenter Hourly",
        role: "engagement assistant",
        goal: "Find posts with target hashtags and draft contextual comments.",
        action_type: "commenter",
        schedule_cron: "0 * * * *",
    },
    AgentTemplate {
        key: "brand_monitoring",
        name: "Brand Monitoring",
        role: "brand analyst",
        goal: "Track brand mentions and sentiment spikes across sources.",
        action_type: "monitor",
        schedule_cron: "*/30 * * * *",
    },
    AgentTemplate {
        key: "daily_calendar_brief",
        name: "Daily Calendar Brief",
        role: "briefing assistant",
        goal: "Prepare concise daily brief from meetings and tasks.",
        action_type: "briefing",
        schedule_cron: "30 8 * * *",
    },
];

/// Turn a natural-language request into an agent draft.
///
/// Keyword matching picks the action type and the first embedded cron
/// expression becomes the schedule.
pub fn draft_from_prompt(prompt: &str) -> AgentDraft {
    let text = prompt.trim();
    if text.is_empty() {
        return AgentDraft {
            name: "Untitled Agent".to_string(),
            role: "assistant".to_string(),
            goal: String::new(),
            action_type: "custom".to_string(),
            schedule_cron: String::new(),
            active: true,
            sandbox: true,
        };
    }

    let lowered = text.to_lowercase();
    let action_type = if lowered.contains("comment") || lowered.contains("hashtag") {
        "commenter"
    } else if lowered.contains("monitor") {
        "monitor"
    } else if lowered.contains("calendar") || lowered.contains("brief") {
        "briefing"
    } else {
        "custom"
    };

    let schedule_cron = CRON_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    AgentDraft {
        name: text.chars().take(MAX_NAME_CHARS).collect(),
        role: "automation assistant".to_string(),
        goal: text.to_string(),
        action_type: action_type.to_string(),
        schedule_cron,
        active: true,
        sandbox: true,
    }
}
