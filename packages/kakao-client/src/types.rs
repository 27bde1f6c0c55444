//! Kakao book search response types.

use serde::{Deserialize, Serialize};

/// A single book from the Kakao book search API, already normalized:
/// authors joined, first ISBN token picked, empty thumbnail dropped.
///
/// `contents` is kept untruncated; display truncation and genre
/// inference happen downstream, over the full text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KakaoBook {
    pub title: String,
    /// All authors joined with ", ".
    pub author: String,
    pub publisher: String,
    /// First token of the (possibly space-separated multi-)ISBN field.
    pub isbn: String,
    /// Cover image URL; `None` when the provider has no cover.
    pub thumbnail: Option<String>,
    /// `YYYY-MM-DD`, truncated from the provider's full timestamp.
    pub publish_date: String,
    /// List price as the provider reports it (free-form).
    pub price: String,
    /// Full blurb text as returned by the provider.
    pub contents: String,
}
