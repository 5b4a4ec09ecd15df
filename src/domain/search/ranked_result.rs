//! Ranked recommendation payload returned by a search.
//!
//! The ranking itself happens on the server; this crate only carries the
//! result to the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::answers::AnswerEntry;
use crate::domain::foundation::{MatchScore, SubcategoryId};

/// Body of a search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub subcategory_id: SubcategoryId,
    pub answers: Vec<AnswerEntry>,
}

/// One recommended product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub rank: u32,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    pub match_score: MatchScore,
    #[serde(default, alias = "reason")]
    pub explanation: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
}

/// Ordered recommendations plus a summary and the criteria behind them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    #[serde(alias = "recommendations")]
    pub items: Vec<RankedItem>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub criteria: BTreeMap<String, serde_json::Value>,
}

impl RankedResult {
    /// Items sorted by rank position, best first.
    pub fn ranked(&self) -> Vec<&RankedItem> {
        let mut items: Vec<&RankedItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.rank);
        items
    }

    pub fn top_pick(&self) -> Option<&RankedItem> {
        self.items.iter().min_by_key(|item| item.rank)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
