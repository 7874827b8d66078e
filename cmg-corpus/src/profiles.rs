//! Industry cost profiles and credit tiers for corpus generation.
//!
//! The ranges mirror small-business underwriting heuristics: margins and
//! cost structure vary by trade, and each credit tier pins the ratio ranges
//! a generated borrower draws from so narratives and risk scores stay
//! consistent.

/// Per-industry financial characteristics.
///
/// Ranges are `(low, high)` fractions of revenue.
#[derive(Debug, Clone, Copy)]
pub struct IndustryProfile {
    /// Industry category name.
    pub name: &'static str,
    /// Net margin range.
    pub margin: (f64, f64),
    /// Cost of goods sold range.
    pub cogs_pct: (f64, f64),
    /// Labor cost range.
    pub labor_pct: (f64, f64),
}

/// The industry mix represented in the reference corpus.
pub const INDUSTRY_PROFILES: &[IndustryProfile] = &[
    IndustryProfile { name: "Retail Bakery", margin: (0.05, 0.15), cogs_pct: (0.35, 0.45), labor_pct: (0.25, 0.35) },
    IndustryProfile { name: "Restaurant", margin: (0.03, 0.10), cogs_pct: (0.30, 0.35), labor_pct: (0.30, 0.35) },
    IndustryProfile { name: "Coffee Shop", margin: (0.05, 0.15), cogs_pct: (0.30, 0.40), labor_pct: (0.25, 0.35) },
    IndustryProfile { name: "Catering Services", margin: (0.10, 0.20), cogs_pct: (0.30, 0.40), labor_pct: (0.25, 0.35) },
    IndustryProfile { name: "HVAC Services", margin: (0.18, 0.28), cogs_pct: (0.25, 0.35), labor_pct: (0.25, 0.35) },
    IndustryProfile { name: "Plumbing Services", margin: (0.20, 0.30), cogs_pct: (0.20, 0.30), labor_pct: (0.25, 0.35) },
    IndustryProfile { name: "Landscaping Services", margin: (0.10, 0.20), cogs_pct: (0.25, 0.35), labor_pct: (0.30, 0.40) },
    IndustryProfile { name: "Auto Body Repair", margin: (0.15, 0.25), cogs_pct: (0.25, 0.35), labor_pct: (0.25, 0.30) },
    IndustryProfile { name: "Fitness Center", margin: (0.15, 0.30), cogs_pct: (0.10, 0.20), labor_pct: (0.25, 0.35) },
    IndustryProfile { name: "Child Care Services", margin: (0.10, 0.20), cogs_pct: (0.15, 0.25), labor_pct: (0.40, 0.50) },
    IndustryProfile { name: "Printing Services", margin: (0.15, 0.25), cogs_pct: (0.30, 0.40), labor_pct: (0.20, 0.30) },
    IndustryProfile { name: "Janitorial Services", margin: (0.08, 0.18), cogs_pct: (0.15, 0.25), labor_pct: (0.45, 0.55) },
];

/// Credit quality tier of a generated borrower.
///
/// Tiers map one-to-one onto risk scores 1 (strongest) through 5 (weakest)
/// and pin the ratio ranges the generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditTier {
    Excellent,
    Good,
    Satisfactory,
    Watch,
    Substandard,
}

/// All tiers, strongest first. Indexable by `risk_score - 1`.
pub const CREDIT_TIERS: &[CreditTier] = &[
    CreditTier::Excellent,
    CreditTier::Good,
    CreditTier::Satisfactory,
    CreditTier::Watch,
    CreditTier::Substandard,
];

impl CreditTier {
    /// The 1–5 risk score this tier maps to.
    pub fn risk_score(self) -> u8 {
        match self {
            Self::Excellent => 1,
            Self::Good => 2,
            Self::Satisfactory => 3,
            Self::Watch => 4,
            Self::Substandard => 5,
        }
    }

    /// DSCR range for borrowers in this tier.
    pub fn dscr_range(self) -> (f64, f64) {
        match self {
            Self::Excellent => (1.60, 2.20),
            Self::Good => (1.40, 1.70),
            Self::Satisfactory => (1.15, 1.45),
            Self::Watch => (0.95, 1.25),
            Self::Substandard => (0.60, 1.00),
        }
    }

    /// Leverage (debt-to-assets) range for borrowers in this tier.
    pub fn leverage_range(self) -> (f64, f64) {
        match self {
            Self::Excellent => (0.15, 0.30),
            Self::Good => (0.25, 0.40),
            Self::Satisfactory => (0.35, 0.55),
            Self::Watch => (0.50, 0.70),
            Self::Substandard => (0.65, 0.90),
        }
    }

    /// Current-ratio range for borrowers in this tier.
    pub fn current_ratio_range(self) -> (f64, f64) {
        match self {
            Self::Excellent => (2.00, 2.80),
            Self::Good => (1.70, 2.20),
            Self::Satisfactory => (1.40, 1.80),
            Self::Watch => (1.10, 1.50),
            Self::Substandard => (0.80, 1.20),
        }
    }

    /// Committee recommendation wording for this tier.
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Excellent => "Approve",
            Self::Good => "Approve with standard covenants",
            Self::Satisfactory => "Approve with enhanced monitoring",
            Self::Watch => "Refer to credit committee",
            Self::Substandard => "Decline",
        }
    }

    /// Tier-specific file-history sentence for the narrative.
    pub fn history_sentence(self) -> &'static str {
        match self {
            Self::Excellent => {
                "The credit file shows no derogatory history and deposit balances \
                 have grown in each of the last three years."
            }
            Self::Good => {
                "Payment history is clean with one minor past-due item cured \
                 promptly and explained by a billing dispute."
            }
            Self::Satisfactory => {
                "The file shows sporadic slow payments to trade creditors, all \
                 brought current within sixty days."
            }
            Self::Watch => {
                "Two covenant waivers were granted in the prior relationship and \
                 deposit balances have trended down year over year."
            }
            Self::Substandard => {
                "Prior covenant breaches, repeated overdrafts, and slow trade \
                 payments weigh heavily on the overall assessment."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_cover_all_risk_scores() {
        let scores: Vec<u8> = CREDIT_TIERS.iter().map(|t| t.risk_score()).collect();
        assert_eq!(scores, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn tier_ranges_are_ordered() {
        for tier in CREDIT_TIERS {
            let (lo, hi) = tier.dscr_range();
            assert!(lo < hi);
            let (lo, hi) = tier.leverage_range();
            assert!(lo < hi);
            let (lo, hi) = tier.current_ratio_range();
            assert!(lo < hi);
        }
    }

    #[test]
    fn industry_ranges_are_fractions() {
        for profile in INDUSTRY_PROFILES {
            for (lo, hi) in [profile.margin, profile.cogs_pct, profile.labor_pct] {
                assert!(lo < hi);
                assert!(lo > 0.0 && hi < 1.0);
            }
        }
    }
}
