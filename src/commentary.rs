//! Post-match commentary boundary
//!
//! After a run ends, the results phase asks a provider for a short title and
//! comment about the match. The remote implementation lives outside this
//! crate; any failure, timeout, or missing credential degrades to the local
//! fallback, so the results phase never has an error state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::BattleOutcome;

/// A title + comment pair shown on the results screen.
///
/// The remote and fallback paths both produce this shape; consumers cannot
/// tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCard {
    pub title: String,
    pub comment: String,
}

/// Failures crossing the commentary boundary
#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("no credential configured")]
    MissingCredential,
    #[error("service request failed: {0}")]
    Request(String),
    #[error("empty response body")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Boundary contract for the commentary collaborator
pub trait CommentaryProvider {
    fn generate(&self, score: u64, outcome: BattleOutcome) -> Result<ResultCard, CommentaryError>;
}

/// Decode a service response payload (`{"title": ..., "comment": ...}`).
///
/// Remote providers decode their transport body with this before returning,
/// so a malformed payload surfaces as a [`CommentaryError`] and degrades to
/// the fallback in [`resolve_card`]:
///
/// ```
/// use battle_tops::commentary::{
///     parse_response, CommentaryError, CommentaryProvider, ResultCard,
/// };
/// use battle_tops::sim::BattleOutcome;
///
/// struct CannedProvider(&'static str);
///
/// impl CommentaryProvider for CannedProvider {
///     fn generate(&self, _: u64, _: BattleOutcome) -> Result<ResultCard, CommentaryError> {
///         parse_response(self.0)
///     }
/// }
///
/// let provider = CannedProvider(r#"{"title":"Close Call","comment":"That was tight."}"#);
/// let card = provider.generate(1200, BattleOutcome::Win)?;
/// assert_eq!(card.title, "Close Call");
/// # Ok::<(), CommentaryError>(())
/// ```
pub fn parse_response(body: &str) -> Result<ResultCard, CommentaryError> {
    if body.trim().is_empty() {
        return Err(CommentaryError::EmptyResponse);
    }
    let card: ResultCard = serde_json::from_str(body)?;
    Ok(card)
}

/// Local commentary, keyed deterministically by outcome and score bucket
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackCommentary;

impl FallbackCommentary {
    /// Score below which a survival reads as lucky rather than dominant
    const LUCKY_SCORE: u64 = 5000;

    pub fn card(score: u64, outcome: BattleOutcome) -> ResultCard {
        let (title, comment) = match outcome {
            BattleOutcome::Loss => ("Scrap Metal", "You got dismantled into spare parts."),
            _ if score < Self::LUCKY_SCORE => {
                ("Lucky Survivor", "You survived, but just barely.")
            }
            _ => ("Arena Champion", "Total dominance! The arena is yours."),
        };
        ResultCard {
            title: title.to_string(),
            comment: comment.to_string(),
        }
    }
}

impl CommentaryProvider for FallbackCommentary {
    fn generate(&self, score: u64, outcome: BattleOutcome) -> Result<ResultCard, CommentaryError> {
        Ok(Self::card(score, outcome))
    }
}

/// Ask a provider for a card, falling back locally on any failure.
///
/// This is the only call the results phase makes; it always yields a card.
pub fn resolve_card<P: CommentaryProvider>(
    provider: &P,
    score: u64,
    outcome: BattleOutcome,
) -> ResultCard {
    match provider.generate(score, outcome) {
        Ok(card) => card,
        Err(err) => {
            log::warn!("commentary provider failed, using fallback: {err}");
            FallbackCommentary::card(score, outcome)
        }
    }
}
