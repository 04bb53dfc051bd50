use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::VoteApi;
use crate::error::{LiveVoteError, Result};
use crate::panel::{SubmissionOutcome, VoteTicket};
use crate::wallet::MessageSigner;

/// Sign the current time with the wallet, then submit the vote
///
/// Every failure is folded into the returned outcome; nothing is retried.
pub async fn submit_vote(
    signer: &dyn MessageSigner,
    api: &dyn VoteApi,
    ticket: &VoteTicket,
) -> SubmissionOutcome {
    match try_submit_vote(signer, api, ticket).await {
        Ok(outcome) => outcome,
        Err(e) => SubmissionOutcome::Failed(e.to_string()),
    }
}

async fn try_submit_vote(
    signer: &dyn MessageSigner,
    api: &dyn VoteApi,
    ticket: &VoteTicket,
) -> Result<SubmissionOutcome> {
    let message = timestamp_message()?;
    let signature = signer.sign_message(&message).await?;
    if signature.is_empty() {
        return Ok(SubmissionOutcome::Unsigned);
    }

    let res = api
        .submit_vote(&ticket.address, ticket.game_id, ticket.candidate_id)
        .await?;
    if res.data.result {
        Ok(SubmissionOutcome::Accepted)
    } else {
        Ok(SubmissionOutcome::Rejected(res.msg))
    }
}

/// Current unix time in milliseconds, as the text the wallet signs
fn timestamp_message() -> Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LiveVoteError::Signing(format!("system clock before unix epoch: {}", e)))?;
    Ok(now.as_millis().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_message_is_millis() {
        let message = timestamp_message().unwrap();
        let millis: u128 = message.parse().unwrap();
        // Later than 2020-01-01
        assert!(millis > 1_577_836_800_000);
    }
}
