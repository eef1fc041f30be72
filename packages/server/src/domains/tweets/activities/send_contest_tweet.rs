use crate::common::AnalysisError;
use crate::domains::tweets::models::{ContestTweetRequest, PublishResult};
use crate::kernel::ServerDeps;

const MAX_TWEET_CHARS: usize = 280;

const TWEET_WRITER_PROMPT: &str = "You are a social media expert crafting engaging tweets.
Your task is to write ONE short, impactful tweet.
Rules:
- Keep it under 280 characters
- Be concise and engaging
- Include relevant hashtags when appropriate
- Don't use emojis unless specifically requested
- Focus on value and clarity

Remember: Write ONLY the tweet content, nothing else.";

/// Generate a contest announcement with the completion service and post it.
pub async fn send_contest_tweet(
    request: &ContestTweetRequest,
    deps: &ServerDeps,
) -> Result<PublishResult, AnalysisError> {
    let contest = request.validate()?;
    let publisher = deps
        .publisher
        .as_ref()
        .ok_or_else(|| AnalysisError::Failure(anyhow::anyhow!("Post publisher not configured")))?;

    let topic = format!(
        "Create an exciting tweet announcing a betting competition.
Host: @{username}
Prize Amount: ${amount}
URI: {uri}

Make it engaging and encourage participation.
Mention it's a number betting game and include the prize amount.
The one who guesses the correct number wins the hidden assets.
Don't forget to include the URI.
The amount is in dollars, not millions of dollars.
Also don't forget to mention the host @{username}.

Add relevant hashtags like #Contest",
        username = contest.username,
        amount = contest.amount,
        uri = contest.wallet_uri(),
    );

    tracing::info!(host = contest.username, amount = contest.amount, "Generating contest tweet");

    let prompt = format!(
        "{}\n\nTopic to tweet about: {}\n\nTweet:",
        TWEET_WRITER_PROMPT, topic
    );
    let raw = deps
        .complete(&prompt)
        .await
        .map_err(AnalysisError::from_upstream)?;
    let content = clean_generated_tweet(&raw);
    if content.is_empty() {
        return Err(AnalysisError::Failure(anyhow::anyhow!(
            "Completion service returned an empty tweet"
        )));
    }

    tracing::debug!(content = %content, "Generated contest tweet");

    publisher
        .publish(&content, contest.reply_to_tweet_id)
        .await
        .map_err(AnalysisError::from_upstream)
}

/// Tidy model output into postable tweet text.
///
/// Trims, drops one wrapping quote at either end and a leading `Tweet:` label,
/// then truncates to 277 characters plus `...` when over the 280 limit.
pub fn clean_generated_tweet(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_suffix(['"', '\''])
        .unwrap_or(trimmed);
    let content = strip_label(trimmed);

    if content.chars().count() > MAX_TWEET_CHARS {
        let head: String = content.chars().take(MAX_TWEET_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

fn strip_label(text: &str) -> &str {
    const LABEL: &str = "tweet:";
    match text.get(..LABEL.len()) {
        Some(head) if head.eq_ignore_ascii_case(LABEL) => text[LABEL.len()..].trim_start(),
        _ => text,
    }
}
