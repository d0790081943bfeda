//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use bbob_ela::prelude::*;
//! ```

pub use crate::bbob::{Problem, Suite};
pub use crate::config::ExperimentConfig;
pub use crate::data::DataFrame;
pub use crate::decomposition::{Reduction, PCA};
pub use crate::error::{ElaError, Result};
pub use crate::features::{
    calculate_feature_set, FeatureClass, FeatureComputer, FeatureListing, FeatureObject,
};
pub use crate::metrics::accuracy;
pub use crate::model_selection::LopoCv;
pub use crate::primitives::Matrix;
pub use crate::sampling::{create_sample, Sampler, SamplingMethod};
pub use crate::traits::{Classifier, Transformer};
pub use crate::tree::{DecisionTreeClassifier, RandomForestClassifier};
