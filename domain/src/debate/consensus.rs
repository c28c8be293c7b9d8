//! Consensus poll results
//!
//! After the verdict every participant, conceded or not, is asked whether it
//! accepts the judge's conclusion. Votes are kept in roster order.

use super::reply::ConsensusReply;
use serde::{Deserialize, Serialize};

/// One participant's vote on the verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusVote {
    /// Participant label
    pub participant: String,
    pub reply: ConsensusReply,
}

impl ConsensusVote {
    pub fn new(participant: impl Into<String>, reply: ConsensusReply) -> Self {
        Self {
            participant: participant.into(),
            reply,
        }
    }
}

/// Aggregated outcome of the consensus poll
///
/// # Example
///
/// ```
/// use debate_domain::debate::{ConsensusReply, ConsensusTally, ConsensusVote};
///
/// let tally = ConsensusTally::from_votes(vec![
///     ConsensusVote::new("Atlas", ConsensusReply::parse(r#"{"agreement": "agree"}"#)),
///     ConsensusVote::new("Boreas", ConsensusReply::parse(r#"{"agreement": "disagree"}"#)),
/// ]);
/// assert_eq!(tally.agree_count, 1);
/// assert_eq!(tally.disagree_count, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusTally {
    pub agree_count: usize,
    pub disagree_count: usize,
    /// Individual votes in poll order
    pub votes: Vec<ConsensusVote>,
}

impl ConsensusTally {
    pub fn from_votes(votes: Vec<ConsensusVote>) -> Self {
        let agree_count = votes.iter().filter(|v| v.reply.agrees()).count();
        let disagree_count = votes.len() - agree_count;

        Self {
            agree_count,
            disagree_count,
            votes,
        }
    }

    /// Look up a participant's vote by label
    pub fn get(&self, participant: &str) -> Option<&ConsensusReply> {
        self.votes
            .iter()
            .find(|v| v.participant == participant)
            .map(|v| &v.reply)
    }

    pub fn is_unanimous(&self) -> bool {
        !self.votes.is_empty() && self.disagree_count == 0
    }

    /// Visual vote summary (e.g., "[●●○]")
    pub fn vote_summary(&self) -> String {
        let marks: String = self
            .votes
            .iter()
            .map(|v| if v.reply.agrees() { '●' } else { '○' })
            .collect();
        format!("[{}]", marks)
    }

    /// Vote block shown to the user
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Agreement: {} | Disagreement: {}",
            self.agree_count, self.disagree_count
        )];
        if !self.votes.is_empty() {
            lines.push("Consensus votes:".to_string());
            for vote in &self.votes {
                let agreement = vote.reply.agreement.display_name();
                match &vote.reply.comment {
                    Some(comment) => {
                        lines.push(format!("- {}: {} ({})", vote.participant, agreement, comment))
                    }
                    None => lines.push(format!("- {}: {}", vote.participant, agreement)),
                }
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally() -> ConsensusTally {
        ConsensusTally::from_votes(vec![
            ConsensusVote::new("Atlas", ConsensusReply::parse(r#"{"agreement": "agree"}"#)),
            ConsensusVote::new(
                "Boreas",
                ConsensusReply::parse(r#"{"agreement": "disagree", "comment": "too terse"}"#),
            ),
            ConsensusVote::new("Cirrus", ConsensusReply::parse("whatever you say")),
        ])
    }

    #[test]
    fn test_tally_counts_ambiguous_as_agree() {
        let tally = tally();
        assert_eq!(tally.agree_count, 2);
        assert_eq!(tally.disagree_count, 1);
        assert!(!tally.get("Cirrus").unwrap().valid);
        assert!(!tally.is_unanimous());
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            tally().summary(),
            "Agreement: 2 | Disagreement: 1\nConsensus votes:\n- Atlas: Agree\n- Boreas: Disagree (too terse)\n- Cirrus: Agree"
        );
        assert_eq!(
            ConsensusTally::default().summary(),
            "Agreement: 0 | Disagreement: 0"
        );
    }

    #[test]
    fn test_vote_summary() {
        assert_eq!(tally().vote_summary(), "[●○●]");
    }
}
