use rand_distr::{Distribution, Normal, Uniform};
use rand_pcg::Pcg64Mcg;
use serde::Deserialize;

#[derive(Debug, Clone, Copy)]
pub enum DistType {
    Constant(f64),
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistParams {
    pub dist_name: String,
    pub seed: Option<u64>,
    pub value: Option<f64>,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DistParams {
    pub fn constant(value: f64) -> Self {
        Self {
            dist_name: "constant".to_string(),
            seed: None,
            value: Some(value),
            mean: None,
            std_dev: None,
            min: None,
            max: None,
        }
    }
}

impl DistType {
    pub fn new(params: &DistParams) -> Result<Self, DistError> {
        match params.dist_name.to_lowercase().as_str() {
            "constant" => Self::build_constant(params),
            "uniform" => Self::build_uniform(params),
            "normal" => Self::build_normal(params),
            _ => Err(DistError::UnknownDistribution(params.dist_name.clone())),
        }
    }

    fn build_constant(params: &DistParams) -> Result<Self, DistError> {
        let value = params.value.ok_or(DistError::Missing("value"))?;
        Ok(Self::Constant(value))
    }

    fn build_uniform(params: &DistParams) -> Result<Self, DistError> {
        let min = params.min.ok_or(DistError::Missing("min"))?;
        let max = params.max.ok_or(DistError::Missing("max"))?;
        if !(min < max) {
            return Err(DistError::Invalid("uniform needs min < max"));
        }
        Ok(Self::Uniform(Uniform::new(min, max)))
    }

    fn build_normal(params: &DistParams) -> Result<Self, DistError> {
        let mean = params.mean.ok_or(DistError::Missing("mean"))?;
        let std_dev = params.std_dev.ok_or(DistError::Missing("std_dev"))?;
        let normal =
            Normal::new(mean, std_dev).map_err(|_| DistError::Invalid("std_dev must be finite"))?;
        Ok(Self::Normal(normal))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DistError {
    #[error("unknown distribution {0}, supported values are: constant, uniform, normal")]
    UnknownDistribution(String),

    #[error("distribution parameter {0} is missing")]
    Missing(&'static str),

    #[error("invalid distribution parameters: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct RngSampler {
    pub dist: DistType,
    pub rng: Pcg64Mcg,
}

impl RngSampler {
    pub fn new(params: &DistParams) -> Result<Self, DistError> {
        let seed: u128 = params.seed.unwrap_or(0) as u128;
        let dist = DistType::new(params)?;
        Ok(Self {
            dist,
            rng: Pcg64Mcg::new(seed),
        })
    }

    pub fn sample(&mut self) -> f64 {
        match self.dist {
            DistType::Constant(value) => value,
            DistType::Uniform(ref dist) => dist.sample(&mut self.rng),
            DistType::Normal(ref dist) => dist.sample(&mut self.rng),
        }
    }
}
