use serde::{Deserialize, Deserializer};

use crate::common::AnalysisError;

const WALLET_BASE_URL: &str = "https://fomo-wallet-frontend.vercel.app";

/// Body of a "announce a betting contest" request.
///
/// Every field is optional at the wire level so missing ones can be reported
/// together by [`ContestTweetRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestTweetRequest {
    #[serde(default)]
    pub reply_to_tweet_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default, alias = "betid", deserialize_with = "string_or_number")]
    pub bet_id: Option<String>,
    #[serde(default, alias = "chainid", deserialize_with = "string_or_number")]
    pub chain_id: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContest<'a> {
    pub username: &'a str,
    pub amount: f64,
    pub contract_address: &'a str,
    pub bet_id: &'a str,
    pub chain_id: &'a str,
    pub reply_to_tweet_id: Option<&'a str>,
}

impl ValidContest<'_> {
    /// Link players follow to place a bet.
    pub fn wallet_uri(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            WALLET_BASE_URL, self.contract_address, self.chain_id, self.bet_id
        )
    }
}

impl ContestTweetRequest {
    pub fn validate(&self) -> Result<ValidContest<'_>, AnalysisError> {
        let username = present(&self.username);
        let contract_address = present(&self.contract_address);
        let bet_id = present(&self.bet_id);
        let chain_id = present(&self.chain_id);

        let missing: Vec<&str> = [
            ("username", username.is_none()),
            ("amount", self.amount.is_none()),
            ("contractAddress", contract_address.is_none()),
            ("betid", bet_id.is_none()),
            ("chainid", chain_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(AnalysisError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let amount = self.amount.unwrap_or_default();
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AnalysisError::Validation(
                "Amount must be a positive number".into(),
            ));
        }

        Ok(ValidContest {
            username: username.unwrap_or_default(),
            amount,
            contract_address: contract_address.unwrap_or_default(),
            bet_id: bet_id.unwrap_or_default(),
            chain_id: chain_id.unwrap_or_default(),
            reply_to_tweet_id: present(&self.reply_to_tweet_id),
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accept ids sent either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> ContestTweetRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let req = parse(serde_json::json!({
            "username": "alice",
            "amount": 25,
            "contractAddress": "0xabc",
            "betid": 7,
            "chainid": 8453
        }));

        let valid = req.validate().unwrap();
        assert_eq!(valid.bet_id, "7");
        assert_eq!(valid.chain_id, "8453");
        assert_eq!(
            valid.wallet_uri(),
            "https://fomo-wallet-frontend.vercel.app/0xabc/8453/7"
        );
    }

    #[test]
    fn missing_fields_are_listed_together() {
        let req = parse(serde_json::json!({ "username": "alice" }));

        let err = req.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: amount, contractAddress, betid, chainid"
        );
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let req = parse(serde_json::json!({
            "username": "alice",
            "amount": 0,
            "contractAddress": "0xabc",
            "betid": "1",
            "chainid": "1"
        }));

        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "Amount must be a positive number"
        );
    }

    #[test]
    fn blank_reply_target_is_ignored() {
        let req = parse(serde_json::json!({
            "username": "alice",
            "amount": 5.5,
            "contractAddress": "0xabc",
            "betid": "1",
            "chainid": "1",
            "replyToTweetId": "  "
        }));

        assert_eq!(req.validate().unwrap().reply_to_tweet_id, None);
    }
}
