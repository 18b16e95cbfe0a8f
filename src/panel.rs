//! Command/update loop for an explorer front-end.
//!
//! A front-end turns user input into a [`Command`], hands it to [`dispatch`],
//! and folds the returned [`Outcome`] into its [`ViewState`]. Nothing here
//! depends on a UI toolkit; `demos/explorer.rs` drives it from the terminal.

use crate::query_helpers::{BlockNumOrId, ProposalsQuery, VotersQuery};
use crate::types::*;
use crate::{Error, HyperionClient, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LookupAccount(String),
    LookupCreator(String),
    LookupBlock(BlockNumOrId),
    ChainInfo,
    Health,
    Voters { producer: String },
    Proposals { proposer: String },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LookupAccount(account) => write!(f, "account {account}"),
            Self::LookupCreator(account) => write!(f, "creator {account}"),
            Self::LookupBlock(block) => write!(f, "block {block}"),
            Self::ChainInfo => f.write_str("info"),
            Self::Health => f.write_str("health"),
            Self::Voters { producer } => write!(f, "voters {producer}"),
            Self::Proposals { proposer } => write!(f, "proposals {proposer}"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
}

/// Parses the terminal syntax `"<verb> [argument]"`, the inverse of `Display`.
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;
        let arg = words.next().map(str::to_string);
        let need = |name: &'static str| arg.clone().ok_or(ParseCommandError::MissingArgument(name));

        match verb {
            "account" => Ok(Self::LookupAccount(need("account")?)),
            "creator" => Ok(Self::LookupCreator(need("creator")?)),
            "block" => {
                let block = need("block")?;
                Ok(Self::LookupBlock(match block.parse::<u64>() {
                    Ok(num) => BlockNumOrId::Num(num),
                    Err(_) => BlockNumOrId::Id(block),
                }))
            }
            "info" => Ok(Self::ChainInfo),
            "health" => Ok(Self::Health),
            "voters" => Ok(Self::Voters {
                producer: need("voters")?,
            }),
            "proposals" => Ok(Self::Proposals {
                proposer: need("proposals")?,
            }),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Result of one dispatched command.
#[derive(Debug)]
pub enum Outcome {
    Account {
        name: String,
        account: Option<Box<GetAccountResponse>>,
    },
    Creator {
        account: String,
        creator: Option<GetCreatorResponse>,
    },
    Block(Box<Block>),
    ChainInfo(ChainInfo),
    Health(Health),
    Voters(GetVotersResponse),
    Proposals(GetProposalsResponse),
    Failed { command: Command, error: Error },
}

/// Runs `command` against `client`. Failures are returned as
/// [`Outcome::Failed`] so the front-end has one value to fold.
pub async fn dispatch(client: &HyperionClient, command: Command) -> Outcome {
    tracing::info!(command = %command, "dispatching");
    match run(client, command.clone()).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::warn!(command = %command, error = %error, "command failed");
            Outcome::Failed { command, error }
        }
    }
}

async fn run(client: &HyperionClient, command: Command) -> Result<Outcome> {
    Ok(match command {
        Command::LookupAccount(name) => {
            let account = client.accounts().get_account(&name).await?;
            Outcome::Account {
                name,
                account: account.map(Box::new),
            }
        }
        Command::LookupCreator(account) => {
            let creator = client.accounts().get_creator(&account).await?;
            Outcome::Creator { account, creator }
        }
        Command::LookupBlock(block) => {
            Outcome::Block(Box::new(client.chain().get_block(block).await?))
        }
        Command::ChainInfo => Outcome::ChainInfo(client.chain().get_info().await?),
        Command::Health => Outcome::Health(client.status().health().await?),
        Command::Voters { producer } => {
            let query = VotersQuery::for_producer(producer);
            Outcome::Voters(client.system().get_voters(&query).await?)
        }
        Command::Proposals { proposer } => {
            let query = ProposalsQuery::by_proposer(proposer);
            Outcome::Proposals(client.system().get_proposals(&query).await?)
        }
    })
}

/// What the panel currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// The command whose result is shown.
    pub title: String,
    pub lines: Vec<String>,
    pub error: Option<String>,
    /// A command was dispatched and its outcome has not been folded in yet.
    pub busy: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `command` as in flight. The previous lines stay visible until
    /// its outcome arrives.
    pub fn begin(&mut self, command: &Command) {
        self.title = command.to_string();
        self.error = None;
        self.busy = true;
    }

    pub fn update(&mut self, outcome: Outcome) {
        self.busy = false;
        match outcome {
            Outcome::Failed { command, error } => {
                self.title = command.to_string();
                self.lines.clear();
                self.error = Some(error.to_string());
            }
            outcome => {
                self.lines = render(&outcome);
                self.error = None;
            }
        }
    }
}

fn render(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Account { name, account: None } => vec![format!("account {name} not found")],
        Outcome::Account {
            account: Some(response),
            ..
        } => {
            let account = &response.account;
            let mut lines = vec![
                format!("account: {}", account.account_name),
                format!("created: {}", account.created),
                format!("ram: {} / {} bytes", account.ram_usage, account.ram_quota),
            ];
            lines.extend(response.tokens.iter().map(|token| {
                format!(
                    "token: {:.*} {} ({})",
                    usize::from(token.precision),
                    token.amount,
                    token.symbol,
                    token.contract
                )
            }));
            if let Some(total) = response.total_actions {
                lines.push(format!("actions: {total}"));
            }
            lines
        }
        Outcome::Creator { creator: None, .. } => vec!["creator not found".to_string()],
        Outcome::Creator {
            account,
            creator: Some(creator),
        } => vec![
            format!("account: {account}"),
            format!("creator: {}", creator.creator),
            format!("block: {}", creator.block_num),
            format!("trx: {}", creator.trx_id),
        ],
        Outcome::Block(block) => vec![
            format!("block: {}", block.block_num),
            format!("id: {}", block.id),
            format!("producer: {}", block.producer),
            format!("timestamp: {}", block.timestamp),
            format!("transactions: {}", block.transactions.len()),
        ],
        Outcome::ChainInfo(info) => vec![
            format!("chain: {}", info.chain_id),
            format!(
                "head: {} ({})",
                info.head_block_num, info.head_block_producer
            ),
            format!(
                "irreversible: {} (lag {})",
                info.last_irreversible_block_num,
                info.irreversibility_lag()
            ),
        ],
        Outcome::Health(health) => {
            let mut lines = vec![format!("version: {}", health.version)];
            lines.extend(
                health
                    .health
                    .iter()
                    .map(|service| format!("{}: {}", service.service, service.status)),
            );
            if let Some(block) = health.last_indexed_block() {
                lines.push(format!("last indexed block: {block}"));
            }
            lines
        }
        Outcome::Voters(response) => {
            let mut lines = vec![format!("voters: {}", response.voters.len())];
            lines.extend(
                response
                    .voters
                    .iter()
                    .map(|voter| format!("{}: {:.0}", voter.account, voter.weight)),
            );
            lines
        }
        Outcome::Proposals(response) if response.proposals.is_empty() => {
            vec!["no proposals".to_string()]
        }
        Outcome::Proposals(response) => response
            .proposals
            .iter()
            .map(|proposal| {
                let state = if proposal.executed { "executed" } else { "open" };
                format!(
                    "{}/{}: {state}, {} pending",
                    proposal.proposer,
                    proposal.proposal_name,
                    proposal.pending_approvals().count()
                )
            })
            .collect(),
        Outcome::Failed { error, .. } => vec![error.to_string()],
    }
}
