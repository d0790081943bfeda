//! BBOB-ELA: exploratory landscape analysis pipeline for the BBOB benchmark.
//!
//! The pipeline samples every BBOB problem, computes ELA feature classes on
//! each sample, aggregates them with the high-level properties of the 24
//! functions, and measures how well a random forest predicts each property
//! under leave-one-problem-out cross-validation.
//!
//! # Quick Start
//!
//! ```
//! use bbob_ela::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let problem = Suite::Bbob.problem(1, 2, 1).expect("valid problem");
//! let mut rng = StdRng::seed_from_u64(0);
//! let sample = create_sample(&problem, SamplingMethod::Lhs, 100, &mut rng).expect("sampled");
//!
//! let obj = FeatureObject::new(sample.x, sample.y, -5.0, 5.0).expect("valid sample");
//! let listing = calculate_feature_set(&obj, FeatureClass::ElaMeta).expect("computed");
//! // the sphere is fitted exactly by a quadratic model
//! assert!(listing.value("ela_meta.quad_simple.adj_r2").expect("present") > 0.99);
//! ```
//!
//! # Modules
//!
//! - [`bbob`]: The 24 noiseless BBOB functions and the large-scale suite
//! - [`sampling`]: Sample designs and the per-suite sampler
//! - [`decomposition`]: PCA and the weighted-PCA reduction
//! - [`features`]: ELA feature classes and the feature computer
//! - [`data`]: DataFrame for named columns
//! - [`aggregate`]: Feature table aggregation
//! - [`tree`]: Decision tree and random forest classifiers
//! - [`metrics`]: Evaluation metrics
//! - [`model_selection`]: Leave-one-problem-out cross-validation
//! - [`report`]: Mean accuracy report
//! - [`jobs`]: Batch-queue job dispatch
//! - [`config`]: Experiment configuration

pub mod aggregate;
pub mod bbob;
pub mod config;
pub mod data;
pub mod decomposition;
pub mod error;
pub mod features;
pub mod jobs;
pub mod metrics;
pub mod model_selection;
pub mod naming;
pub mod prelude;
pub mod primitives;
pub mod report;
pub mod sampling;
pub mod traits;
pub mod tree;

pub use error::{ElaError, Result};
pub use traits::{Classifier, Transformer};
