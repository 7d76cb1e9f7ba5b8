use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::schema::{ArgType, ToolArgument};
use super::{ToolOutput, ToolSpec};
use crate::mcp::error::{RpcError, RpcResult};

pub const ASK_COUNCIL: &str = "ask_council";

const ARGUMENTS: &[ToolArgument] = &[ToolArgument {
    name: "question",
    arg_type: ArgType::String,
    description: "The question or decision to put before the council.",
    required: true,
    default: None,
    min_length: Some(1),
}];

// (name, role, opinion), in the order the council speaks.
const MEMBERS: [(&str, &str, &str); 3] = [
    (
        "The Strategist",
        "Long-term planning",
        "Decide what success looks like a year from now, then work backwards to the first step you can take this week.",
    ),
    (
        "The Skeptic",
        "Risk assessment",
        "Name the single assumption that would sink this plan if it were wrong, and find a cheap way to test it first.",
    ),
    (
        "The Optimist",
        "Opportunity spotting",
        "Whatever you choose, there is upside here. Look for the option that keeps the most doors open.",
    ),
];

#[derive(Debug, Deserialize)]
struct AskCouncilInput {
    question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilMember {
    pub name: String,
    pub role: String,
    pub opinion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilResponse {
    pub question: String,
    pub members: Vec<CouncilMember>,
}

pub(super) fn spec() -> ToolSpec {
    ToolSpec {
        name: ASK_COUNCIL,
        title: "Ask Your AI Council",
        description: "Puts a question to a council of three advisors and returns each member's opinion.",
        arguments: ARGUMENTS,
        invoking: "Convening the council",
        invoked: "The council has spoken",
        run,
    }
}

pub fn convene(question: &str) -> CouncilResponse {
    CouncilResponse {
        question: question.to_string(),
        members: MEMBERS
            .iter()
            .map(|(name, role, opinion)| CouncilMember {
                name: name.to_string(),
                role: role.to_string(),
                opinion: opinion.to_string(),
            })
            .collect(),
    }
}

fn summarize(response: &CouncilResponse) -> String {
    let mut text = format!(
        "Your AI Council has considered: \"{}\"",
        response.question
    );
    for member in &response.members {
        text.push_str(&format!(
            "\n- {} ({}): {}",
            member.name, member.role, member.opinion
        ));
    }
    text
}

fn run(arguments: Value) -> RpcResult<ToolOutput> {
    let input: AskCouncilInput =
        serde_json::from_value(arguments).map_err(|e| RpcError::Validation(vec![e.to_string()]))?;

    info!("Council convened for question: {}", input.question);

    let response = convene(&input.question);
    Ok(ToolOutput {
        text: summarize(&response),
        structured: serde_json::to_value(&response)?,
    })
}
