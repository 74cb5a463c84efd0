use clap::Args;
use serde_json::Value;

use payplan_core::proposal::{self, ProposalInput};

use crate::input;

/// Arguments for proposal assembly
#[derive(Args)]
pub struct ProposalArgs {
    /// Path to a JSON or YAML proposal file (client, project, contract
    /// terms, and the plan variants to quote)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_proposal(args: ProposalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let proposal_input: ProposalInput = if let Some(ref path) = args.input {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            input::file::read_yaml(path)?
        } else {
            input::file::read_json(path)?
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for proposal assembly".into());
    };
    let result = proposal::build(&proposal_input)?;
    Ok(serde_json::to_value(result)?)
}
