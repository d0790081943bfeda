//! BBOB noiseless benchmark suites.
//!
//! Provides the two suites used by the pipeline, `bbob` and
//! `bbob-largescale`, with deterministic instance generation and all 24
//! noiseless functions.
//!
//! # Example
//!
//! ```
//! use bbob_ela::bbob::{Problem, Suite};
//!
//! let problem = Problem::new(Suite::Bbob, 1, 3, 1).expect("valid problem");
//! let optimum = problem.optimum();
//! assert!((problem.evaluate(&optimum.0) - optimum.1).abs() < 1e-9);
//! assert_eq!(problem.id(), "bbob_f001_i01_d03");
//! ```

mod functions;
mod instance;
mod transform;

pub use transform::Rotation;

use crate::error::{ElaError, Result};
use instance::InstanceData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound of every search domain coordinate.
pub const LOWER_BOUND: f64 = -5.0;
/// Upper bound of every search domain coordinate.
pub const UPPER_BOUND: f64 = 5.0;

/// Benchmark suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suite {
    /// Classic suite, dimensions 2 to 40.
    #[serde(rename = "bbob")]
    Bbob,
    /// Large-scale suite, dimensions 20 to 640.
    #[serde(rename = "bbob-largescale")]
    BbobLargeScale,
}

const BBOB_DIMENSIONS: [usize; 6] = [2, 3, 5, 10, 20, 40];
const LARGE_SCALE_DIMENSIONS: [usize; 6] = [20, 40, 80, 160, 320, 640];
const BBOB_INSTANCES: [u32; 15] = [1, 2, 3, 4, 5, 71, 72, 73, 74, 75, 76, 77, 78, 79, 80];
const LARGE_SCALE_INSTANCES: [u32; 15] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

impl Suite {
    /// Both suites, in sampling order.
    pub const ALL: [Suite; 2] = [Suite::Bbob, Suite::BbobLargeScale];

    /// Suite name as used in file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Suite::Bbob => "bbob",
            Suite::BbobLargeScale => "bbob-largescale",
        }
    }

    /// The suite whose samples cover `dim`: large-scale from 20 upwards.
    #[must_use]
    pub fn for_dimension(dim: usize) -> Self {
        if dim >= 20 {
            Suite::BbobLargeScale
        } else {
            Suite::Bbob
        }
    }

    /// Dimensions the suite defines.
    #[must_use]
    pub fn dimensions(self) -> &'static [usize] {
        match self {
            Suite::Bbob => &BBOB_DIMENSIONS,
            Suite::BbobLargeScale => &LARGE_SCALE_DIMENSIONS,
        }
    }

    /// Native instance ids.
    #[must_use]
    pub fn instances(self) -> &'static [u32] {
        match self {
            Suite::Bbob => &BBOB_INSTANCES,
            Suite::BbobLargeScale => &LARGE_SCALE_INSTANCES,
        }
    }

    /// Builds a single problem of this suite.
    ///
    /// # Errors
    ///
    /// See [`Problem::new`].
    pub fn problem(self, function: u8, dim: usize, instance: u32) -> Result<Problem> {
        Problem::new(self, function, dim, instance)
    }

    /// Every problem of the suite, ordered by dimension, then function,
    /// then instance.
    pub fn problems(self) -> impl Iterator<Item = Problem> {
        self.dimensions().iter().flat_map(move |&dim| {
            (1..=24u8).flat_map(move |fun| {
                self.instances()
                    .iter()
                    .map(move |&inst| Problem::build(self, fun, dim, inst))
            })
        })
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suite {
    type Err = ElaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bbob" => Ok(Suite::Bbob),
            "bbob-largescale" => Ok(Suite::BbobLargeScale),
            other => Err(ElaError::Other(format!("Unknown benchmark suite: {other}"))),
        }
    }
}

/// One (suite, function, dimension, instance) objective.
#[derive(Debug, Clone)]
pub struct Problem {
    suite: Suite,
    function: u8,
    dim: usize,
    instance: u32,
    data: InstanceData,
}

impl Problem {
    /// Creates a problem.
    ///
    /// # Errors
    ///
    /// Returns an error if `function` is outside `1..=24` or `dim` is zero.
    pub fn new(suite: Suite, function: u8, dim: usize, instance: u32) -> Result<Self> {
        if !(1..=24).contains(&function) {
            return Err(ElaError::InvalidHyperparameter {
                param: "function".to_string(),
                value: function.to_string(),
                constraint: "1..=24".to_string(),
            });
        }
        if dim == 0 {
            return Err(ElaError::InvalidHyperparameter {
                param: "dim".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        Ok(Self::build(suite, function, dim, instance))
    }

    fn build(suite: Suite, function: u8, dim: usize, instance: u32) -> Self {
        Self {
            suite,
            function,
            dim,
            instance,
            data: InstanceData::generate(suite, function, dim, instance),
        }
    }

    #[must_use]
    pub fn suite(&self) -> Suite {
        self.suite
    }

    #[must_use]
    pub fn function(&self) -> u8 {
        self.function
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Native instance id.
    #[must_use]
    pub fn instance(&self) -> u32 {
        self.instance
    }

    /// Info string, e.g. `bbob_f001_i01_d02`.
    #[must_use]
    pub fn id(&self) -> String {
        format!(
            "{}_f{:03}_i{:02}_d{:02}",
            self.suite.name(),
            self.function,
            self.instance,
            self.dim
        )
    }

    /// Lower and upper bound vectors.
    #[must_use]
    pub fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        (vec![LOWER_BOUND; self.dim], vec![UPPER_BOUND; self.dim])
    }

    /// Evaluates the objective at `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from the problem dimension.
    #[must_use]
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.dim, "point dimension must match problem");
        functions::FUNCTIONS[usize::from(self.function) - 1](x, &self.data)
    }

    /// Location and value of the global optimum.
    #[must_use]
    pub fn optimum(&self) -> (Vec<f64>, f64) {
        (self.data.xopt.clone(), self.data.fopt)
    }
}

/// Extracts the function id from an info string such as `bbob_f012_i01_d05`.
///
/// # Errors
///
/// Returns [`ElaError::Parse`] if the string has no `_f<id>_` segment.
pub fn parse_function_id(info: &str) -> Result<u8> {
    let parse_err = |message: &str| ElaError::Parse {
        path: info.into(),
        line: 0,
        message: message.to_string(),
    };
    let start = info.find("_f").ok_or_else(|| parse_err("no '_f' marker"))? + 2;
    let rest = &info[start..];
    let end = rest.find('_').unwrap_or(rest.len());
    rest[..end]
        .parse()
        .map_err(|_| parse_err("function id is not an integer"))
}

#[cfg(test)]
#[path = "bbob_tests.rs"]
mod tests;
