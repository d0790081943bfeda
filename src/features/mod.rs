//! Exploratory landscape analysis (ELA) feature sets.
//!
//! Every [`FeatureClass`] maps a [`FeatureObject`] to an ordered
//! [`FeatureListing`] of `{class}.{feature}` values followed by the two cost
//! entries `{class}.costs_fun_evals` and `{class}.costs_runtime`.
//!
//! # Example
//!
//! ```
//! use bbob_ela::features::{calculate_feature_set, FeatureClass, FeatureObject};
//! use bbob_ela::primitives::Matrix;
//!
//! let x = Matrix::from_vec(4, 1, vec![-2.0, -1.0, 1.0, 2.0]).expect("valid shape");
//! let obj = FeatureObject::new(x, vec![4.0, 1.0, 1.0, 4.0], -5.0, 5.0).expect("valid sample");
//! let listing = calculate_feature_set(&obj, FeatureClass::Basic).expect("computes");
//! assert_eq!(listing.get("basic.observations"), Some("4"));
//! assert_eq!(listing.names().last(), Some("basic.costs_runtime"));
//! ```

mod basic;
mod cell;
mod computer;
mod dispersion;
mod distribution;
mod information;
mod level;
mod listing;
mod meta;
mod nbc;
mod object;
mod principal;
pub(crate) mod stats;

pub use computer::{FeatureComputer, FeatureOutcome, SweepSummary, CELL_BLOCKS};
pub use listing::FeatureListing;
pub use object::FeatureObject;

use crate::error::{ElaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// A named group of landscape features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureClass {
    Basic,
    ElaDistr,
    ElaMeta,
    ElaLevel,
    Pca,
    Disp,
    Nbc,
    Ic,
    Limo,
    CmAngle,
    CmConv,
    CmGrad,
}

impl FeatureClass {
    /// Every supported class.
    pub const ALL: [FeatureClass; 12] = [
        FeatureClass::Basic,
        FeatureClass::ElaDistr,
        FeatureClass::ElaMeta,
        FeatureClass::ElaLevel,
        FeatureClass::Pca,
        FeatureClass::Disp,
        FeatureClass::Nbc,
        FeatureClass::Ic,
        FeatureClass::Limo,
        FeatureClass::CmAngle,
        FeatureClass::CmConv,
        FeatureClass::CmGrad,
    ];

    /// Name used in feature names and file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FeatureClass::Basic => "basic",
            FeatureClass::ElaDistr => "ela_distr",
            FeatureClass::ElaMeta => "ela_meta",
            FeatureClass::ElaLevel => "ela_level",
            FeatureClass::Pca => "pca",
            FeatureClass::Disp => "disp",
            FeatureClass::Nbc => "nbc",
            FeatureClass::Ic => "ic",
            FeatureClass::Limo => "limo",
            FeatureClass::CmAngle => "cm_angle",
            FeatureClass::CmConv => "cm_conv",
            FeatureClass::CmGrad => "cm_grad",
        }
    }

    /// Whether the class works on a cell grid (three blocks per dimension).
    #[must_use]
    pub fn requires_cells(self) -> bool {
        matches!(
            self,
            FeatureClass::CmAngle | FeatureClass::CmConv | FeatureClass::CmGrad
        )
    }
}

impl fmt::Display for FeatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureClass {
    type Err = ElaError;

    fn from_str(s: &str) -> Result<Self> {
        FeatureClass::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ElaError::UnsupportedFeatureClass(s.to_string()))
    }
}

/// Computes one feature class on `obj`.
///
/// # Errors
///
/// Returns [`ElaError::FeatureComputation`] if a cell-based class is
/// requested on an object without a cell grid, or the sample is too small.
pub fn calculate_feature_set(obj: &FeatureObject, class: FeatureClass) -> Result<FeatureListing> {
    if class.requires_cells() && !obj.allows_cell_mapping() {
        return Err(ElaError::feature(
            class.name(),
            "cell mapping requires at least 3 blocks per dimension",
        ));
    }
    if obj.n_obs() < 2 {
        return Err(ElaError::feature(
            class.name(),
            "at least two observations are required",
        ));
    }

    let start = Instant::now();
    let mut listing = FeatureListing::new();
    match class {
        FeatureClass::Basic => basic::compute(obj, &mut listing),
        FeatureClass::ElaDistr => distribution::compute(obj, &mut listing),
        FeatureClass::ElaMeta => meta::compute(obj, &mut listing),
        FeatureClass::ElaLevel => level::compute(obj, &mut listing),
        FeatureClass::Pca => principal::compute(obj, &mut listing),
        FeatureClass::Disp => dispersion::compute(obj, &mut listing),
        FeatureClass::Nbc => nbc::compute(obj, &mut listing),
        FeatureClass::Ic => information::compute(obj, &mut listing),
        FeatureClass::Limo => cell::compute_limo(obj, &mut listing),
        FeatureClass::CmAngle => cell::compute_angle(obj, &mut listing),
        FeatureClass::CmConv => cell::compute_conv(obj, &mut listing),
        FeatureClass::CmGrad => cell::compute_grad(obj, &mut listing),
    }
    listing.push(format!("{class}.costs_fun_evals"), 0.0);
    listing.push(
        format!("{class}.costs_runtime"),
        start.elapsed().as_secs_f64(),
    );
    Ok(listing)
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
