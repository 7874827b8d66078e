//! Query synthesis from a borrower's financial profile.
//!
//! Turns computed ratios into qualitative bucket labels using fixed, named
//! thresholds, then renders a templated search sentence. Everything here is
//! a pure function of the profile, so the same profile always produces the
//! same query string and therefore the same retrieval results.

use serde::{Deserialize, Serialize};

// ── Bucket thresholds ──────────────────────────────────────────────
// Credit-policy cutoffs used to classify ratios. Shared with underwriting
// guidance; changing one changes which reference memos a profile matches.

/// DSCR at or above this is "strong" coverage.
pub const COVERAGE_STRONG_MIN: f64 = 1.50;
/// DSCR at or above this (but below strong) is "adequate" coverage.
pub const COVERAGE_ADEQUATE_MIN: f64 = 1.25;

/// Debt-to-assets at or below this is "conservative" leverage.
pub const LEVERAGE_CONSERVATIVE_MAX: f64 = 0.30;
/// Debt-to-assets at or below this (but above conservative) is "moderate".
pub const LEVERAGE_MODERATE_MAX: f64 = 0.50;

/// Current ratio at or above this is "strong" liquidity.
pub const LIQUIDITY_STRONG_MIN: f64 = 2.00;
/// Current ratio at or above this (but below strong) is "adequate".
pub const LIQUIDITY_ADEQUATE_MIN: f64 = 1.50;

/// Qualitative debt-service-coverage classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageBucket {
    Strong,
    Adequate,
    Weak,
}

impl CoverageBucket {
    /// Classify a debt service coverage ratio.
    pub fn from_ratio(dscr: f64) -> Self {
        if dscr >= COVERAGE_STRONG_MIN {
            Self::Strong
        } else if dscr >= COVERAGE_ADEQUATE_MIN {
            Self::Adequate
        } else {
            Self::Weak
        }
    }

    /// Label used in the synthesized query.
    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Adequate => "adequate",
            Self::Weak => "weak",
        }
    }
}

/// Qualitative leverage classification (total debt / total assets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverageBucket {
    Conservative,
    Moderate,
    Aggressive,
}

impl LeverageBucket {
    /// Classify a leverage ratio.
    pub fn from_ratio(leverage: f64) -> Self {
        if leverage <= LEVERAGE_CONSERVATIVE_MAX {
            Self::Conservative
        } else if leverage <= LEVERAGE_MODERATE_MAX {
            Self::Moderate
        } else {
            Self::Aggressive
        }
    }

    /// Label used in the synthesized query.
    pub fn label(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

/// Qualitative liquidity classification (current ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidityBucket {
    Strong,
    Adequate,
    Strained,
}

impl LiquidityBucket {
    /// Classify a current ratio.
    pub fn from_ratio(current_ratio: f64) -> Self {
        if current_ratio >= LIQUIDITY_STRONG_MIN {
            Self::Strong
        } else if current_ratio >= LIQUIDITY_ADEQUATE_MIN {
            Self::Adequate
        } else {
            Self::Strained
        }
    }

    /// Label used in the synthesized query.
    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Adequate => "adequate",
            Self::Strained => "strained",
        }
    }
}

/// A borrower's financial profile for one retrieval request.
///
/// Built by the caller from extracted and calculated financial data; never
/// persisted. Ratios the upstream calculation could not produce stay `None`
/// and simply contribute nothing to the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryProfile {
    /// Borrower industry category, e.g. "Restaurant".
    pub industry: String,
    /// Debt service coverage ratio.
    pub dscr: Option<f64>,
    /// Leverage ratio (total debt / total assets).
    pub leverage_ratio: Option<f64>,
    /// Current ratio (current assets / current liabilities).
    pub current_ratio: Option<f64>,
}

impl QueryProfile {
    /// Create a profile with all three ratios present.
    pub fn new(
        industry: impl Into<String>,
        dscr: f64,
        leverage_ratio: f64,
        current_ratio: f64,
    ) -> Self {
        Self {
            industry: industry.into(),
            dscr: Some(dscr),
            leverage_ratio: Some(leverage_ratio),
            current_ratio: Some(current_ratio),
        }
    }

    /// Derive the 1–5 risk tier from the bucketed ratios.
    ///
    /// Starts at 1 and adds one for each adverse bucket (weak coverage,
    /// aggressive leverage, strained liquidity), plus one more when all
    /// three are adverse. Missing ratios contribute nothing, so a sparse
    /// profile tiers optimistically.
    pub fn risk_tier(&self) -> u8 {
        let weak_coverage =
            self.dscr.is_some_and(|r| CoverageBucket::from_ratio(r) == CoverageBucket::Weak);
        let aggressive_leverage = self
            .leverage_ratio
            .is_some_and(|r| LeverageBucket::from_ratio(r) == LeverageBucket::Aggressive);
        let strained_liquidity = self
            .current_ratio
            .is_some_and(|r| LiquidityBucket::from_ratio(r) == LiquidityBucket::Strained);

        let adverse =
            [weak_coverage, aggressive_leverage, strained_liquidity].iter().filter(|&&b| b).count()
                as u8;

        1 + adverse + u8::from(adverse == 3)
    }
}

/// Render the search sentence for a profile.
///
/// Pure function of the profile's fields: industry first, then one phrase
/// per present ratio in a fixed order, then the derived risk tier. Calling
/// twice with an identical profile yields an identical string.
pub fn build_query(profile: &QueryProfile) -> String {
    let mut parts: Vec<String> = vec![format!("{} borrower", profile.industry)];

    if let Some(dscr) = profile.dscr {
        parts.push(format!("{} debt service coverage", CoverageBucket::from_ratio(dscr).label()));
    }
    if let Some(leverage) = profile.leverage_ratio {
        parts.push(format!("{} leverage", LeverageBucket::from_ratio(leverage).label()));
    }
    if let Some(current) = profile.current_ratio {
        parts.push(format!("{} liquidity", LiquidityBucket::from_ratio(current).label()));
    }

    parts.push(format!("risk tier {}", profile.risk_tier()));

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_documented_thresholds() {
        assert_eq!(CoverageBucket::from_ratio(1.50), CoverageBucket::Strong);
        assert_eq!(CoverageBucket::from_ratio(1.25), CoverageBucket::Adequate);
        assert_eq!(CoverageBucket::from_ratio(0.90), CoverageBucket::Weak);

        assert_eq!(LeverageBucket::from_ratio(0.30), LeverageBucket::Conservative);
        assert_eq!(LeverageBucket::from_ratio(0.50), LeverageBucket::Moderate);
        assert_eq!(LeverageBucket::from_ratio(0.75), LeverageBucket::Aggressive);

        assert_eq!(LiquidityBucket::from_ratio(2.00), LiquidityBucket::Strong);
        assert_eq!(LiquidityBucket::from_ratio(1.50), LiquidityBucket::Adequate);
        assert_eq!(LiquidityBucket::from_ratio(1.10), LiquidityBucket::Strained);
    }

    #[test]
    fn risk_tier_counts_adverse_buckets() {
        // All healthy.
        assert_eq!(QueryProfile::new("Plumbing Services", 1.8, 0.25, 2.2).risk_tier(), 1);
        // One adverse (weak coverage).
        assert_eq!(QueryProfile::new("Restaurant", 0.9, 0.25, 2.2).risk_tier(), 2);
        // Two adverse.
        assert_eq!(QueryProfile::new("Restaurant", 0.9, 0.75, 2.2).risk_tier(), 3);
        // All three adverse gets the extra bump to 5.
        assert_eq!(QueryProfile::new("Restaurant", 0.9, 0.75, 1.0).risk_tier(), 5);
    }

    #[test]
    fn sparse_profiles_tier_optimistically() {
        let profile = QueryProfile {
            industry: "Coffee Shop".to_string(),
            dscr: None,
            leverage_ratio: None,
            current_ratio: None,
        };
        assert_eq!(profile.risk_tier(), 1);
        assert_eq!(build_query(&profile), "Coffee Shop borrower, risk tier 1");
    }

    #[test]
    fn query_synthesis_is_deterministic() {
        let profile = QueryProfile::new("Restaurant", 0.9, 0.75, 1.2);
        assert_eq!(build_query(&profile), build_query(&profile));
    }

    #[test]
    fn query_reflects_bucket_labels() {
        let profile = QueryProfile::new("Restaurant", 0.9, 0.75, 1.2);
        assert_eq!(
            build_query(&profile),
            "Restaurant borrower, weak debt service coverage, aggressive leverage, \
             strained liquidity, risk tier 5"
        );
    }
}
