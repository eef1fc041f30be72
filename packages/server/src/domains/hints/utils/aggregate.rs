/// Pure scoring functions
///
/// No side effects and no failure modes: they assume finite inputs, which the
/// scorer's validation guarantees.
use crate::config::ScoreWeights;
use crate::domains::hints::models::HintScore;

/// `round(x * 100) / 100`. Halves round away from zero; scores are never
/// negative, so in practice halves round up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted sum of the four dimensions, rounded to two decimals.
pub fn aggregate_score(score: &HintScore, weights: &ScoreWeights) -> f64 {
    round2(
        score.clarity * weights.clarity
            + score.specificity * weights.specificity
            + score.context * weights.context
            + score.effort * weights.effort,
    )
}

/// Mean of the given scores rounded to two decimals, or exactly 0 when empty.
pub fn mean_score(scores: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = scores
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));

    if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    }
}
