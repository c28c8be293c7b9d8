//! Per-round summaries of the participants' latest positions

use super::reply::{DebaterReply, Stance};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DigestEntry<'a> {
    model: &'a str,
    stance: Stance,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conceded_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// Build the JSON digest handed to active debaters at the start of a round.
///
/// Takes `(label, latest reply)` pairs in roster order; participants without
/// a recorded reply are simply absent from the input. Output is a
/// pretty-printed JSON array.
pub fn round_digest<'a, I>(latest: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a DebaterReply)>,
{
    let entries: Vec<DigestEntry<'a>> = latest
        .into_iter()
        .map(|(label, reply)| DigestEntry {
            model: label,
            stance: reply.stance,
            content: &reply.content,
            conceded_to: reply.conceded_to.as_deref(),
            notes: reply.notes.as_deref(),
        })
        .collect();

    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// One line per participant: `- Label (stance): content`
pub fn final_positions<'a, I>(latest: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a DebaterReply)>,
{
    latest
        .into_iter()
        .map(|(label, reply)| format!("- {} ({}): {}", label, reply.stance_label(), reply.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replies() -> Vec<(String, DebaterReply)> {
        vec![
            (
                "Atlas".to_string(),
                DebaterReply::parse(r#"{"stance": "stand", "content": "Paris", "notes": "sure"}"#),
            ),
            (
                "Boreas".to_string(),
                DebaterReply::parse(r#"{"stance": "concede:Atlas", "content": "Fine"}"#),
            ),
        ]
    }

    #[test]
    fn test_round_digest_shape() {
        let replies = replies();
        let digest = round_digest(replies.iter().map(|(l, r)| (l.as_str(), r)));
        let parsed: serde_json::Value = serde_json::from_str(&digest).unwrap();

        assert_eq!(parsed[0]["model"], "Atlas");
        assert_eq!(parsed[0]["stance"], "stand");
        assert_eq!(parsed[0]["notes"], "sure");
        assert!(parsed[0].get("conceded_to").is_none());
        assert_eq!(parsed[1]["stance"], "concede");
        assert_eq!(parsed[1]["conceded_to"], "Atlas");
        assert!(parsed[1].get("notes").is_none());
        assert!(digest.contains("\n  {"));
    }

    #[test]
    fn test_round_digest_empty() {
        assert_eq!(round_digest(std::iter::empty()), "[]");
    }

    #[test]
    fn test_final_positions() {
        let replies = replies();
        let text = final_positions(replies.iter().map(|(l, r)| (l.as_str(), r)));
        assert_eq!(
            text,
            "- Atlas (stand): Paris\n- Boreas (concede to Atlas): Fine"
        );
    }
}
