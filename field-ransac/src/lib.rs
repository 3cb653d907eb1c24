//! Sample consensus fitting of field lines and the centre circle.
//!
//! Both models are minimal two point estimators:
//!
//! * [`LineEstimator`] draws the line through the two samples
//! * [`CircleEstimator`] draws both circles of a known radius through the two samples
//!
//! [`Ransac`] runs the hypothesise-and-verify loop over a point cloud. Hypotheses with
//! more inliers always win. Among hypotheses with the same support the one with the
//! lower (more negative) [`Fit::score`] wins.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use arrayvec::ArrayVec;
use field_core::{
    nalgebra::Point2,
    sample_consensus::{Consensus, Estimator, Model},
    Circle, FieldLine,
};
use float_ord::FloatOrd;
use log::*;
use rand::{seq::index, Rng, SeedableRng};
use rand_pcg::Pcg64;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Estimates the line through two points.
#[derive(Copy, Clone, Debug, Default)]
pub struct LineEstimator;

impl Estimator<Point2<f64>> for LineEstimator {
    type Model = FieldLine;
    type ModelIter = Option<FieldLine>;
    const MIN_SAMPLES: usize = 2;

    fn estimate<I>(&self, mut data: I) -> Self::ModelIter
    where
        I: Iterator<Item = Point2<f64>> + Clone,
    {
        let a = data.next()?;
        let b = data.next()?;
        (a != b).then(|| FieldLine::new(a, b))
    }
}

/// Estimates circles of a fixed radius through two points.
#[derive(Copy, Clone, Debug)]
pub struct CircleEstimator {
    pub radius: f64,
}

impl CircleEstimator {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Estimator<Point2<f64>> for CircleEstimator {
    type Model = Circle;
    type ModelIter = ArrayVec<Circle, 2>;
    const MIN_SAMPLES: usize = 2;

    fn estimate<I>(&self, mut data: I) -> Self::ModelIter
    where
        I: Iterator<Item = Point2<f64>> + Clone,
    {
        let mut circles = ArrayVec::new();
        if let (Some(a), Some(b)) = (data.next(), data.next()) {
            if let Some((first, second)) = Circle::through(a, b, self.radius) {
                circles.push(first);
                circles.push(second);
            }
        }
        circles
    }
}

/// Consensus parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RansacConfig {
    /// Number of minimal samples drawn per fit (`k`).
    pub iterations: usize,
    /// Largest residual of a point that still supports a model (`e`).
    pub inlier_threshold: f64,
    /// Fewest supporting points a model needs to be reported (`n`).
    pub min_inliers: usize,
    /// Seed of the sampler, so every tick sees the same sequence.
    pub seed: u64,
}

impl Default for RansacConfig {
    fn default() -> Self {
        Self {
            iterations: 40,
            inlier_threshold: 15.0,
            min_inliers: 15,
            seed: 42,
        }
    }
}

impl RansacConfig {
    pub fn min_inliers(self, min_inliers: usize) -> Self {
        Self {
            min_inliers,
            ..self
        }
    }
}

/// The best model found along with its support.
#[derive(Clone, Debug, PartialEq)]
pub struct Fit<M> {
    pub model: M,
    /// Indices into the data of every point within the inlier threshold.
    pub inliers: Vec<usize>,
    /// `mean inlier residual - inlier_threshold * inliers / min_inliers`.
    ///
    /// This gets more negative as support grows and as the support hugs the model.
    pub score: f64,
}

/// Random sample consensus with a deterministic sampler.
#[derive(Clone, Debug)]
pub struct Ransac<R = Pcg64> {
    pub config: RansacConfig,
    rng: R,
}

impl Ransac<Pcg64> {
    /// A consensus seeded from [`RansacConfig::seed`].
    pub fn new(config: RansacConfig) -> Self {
        Self::with_rng(config, Pcg64::seed_from_u64(config.seed))
    }
}

impl<R> Ransac<R>
where
    R: Rng,
{
    pub fn with_rng(config: RansacConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Scores `model` against every point. Returns `None` if the support is too small.
    pub fn evaluate<M>(&self, model: M, points: &[Point2<f64>]) -> Option<Fit<M>>
    where
        M: Model<Point2<f64>>,
    {
        let threshold = self.config.inlier_threshold;
        let mut total = 0.0;
        let inliers: Vec<usize> = points
            .iter()
            .enumerate()
            .filter_map(|(ix, point)| {
                let residual = model.residual(point);
                (residual <= threshold).then(|| {
                    total += residual;
                    ix
                })
            })
            .collect();
        if inliers.is_empty() || inliers.len() < self.config.min_inliers {
            return None;
        }
        let count = inliers.len() as f64;
        let score = total / count - threshold * count / self.config.min_inliers.max(1) as f64;
        Some(Fit {
            model,
            inliers,
            score,
        })
    }

    /// Finds the best supported model of `estimator` among `points`.
    pub fn fit<E>(&mut self, estimator: &E, points: &[Point2<f64>]) -> Option<Fit<E::Model>>
    where
        E: Estimator<Point2<f64>>,
    {
        if points.len() < E::MIN_SAMPLES.max(self.config.min_inliers) {
            return None;
        }
        let mut best: Option<Fit<E::Model>> = None;
        for _ in 0..self.config.iterations {
            let sample = index::sample(&mut self.rng, points.len(), E::MIN_SAMPLES).into_vec();
            let hypotheses = estimator.estimate(sample.iter().map(|&ix| points[ix]));
            for hypothesis in hypotheses {
                if let Some(candidate) = self.evaluate(hypothesis, points) {
                    if best.as_ref().map_or(true, |best| better(&candidate, best)) {
                        best = Some(candidate);
                    }
                }
            }
        }
        if let Some(best) = &best {
            trace!(
                "consensus of {} out of {} points with score {}",
                best.inliers.len(),
                points.len(),
                best.score
            );
        }
        best
    }
}

fn better<M>(candidate: &Fit<M>, best: &Fit<M>) -> bool {
    (candidate.inliers.len(), FloatOrd(-candidate.score))
        > (best.inliers.len(), FloatOrd(-best.score))
}

impl<E, R> Consensus<E, Point2<f64>> for Ransac<R>
where
    E: Estimator<Point2<f64>>,
    R: Rng,
{
    type Inliers = Vec<usize>;

    fn model<I>(&mut self, estimator: &E, data: I) -> Option<E::Model>
    where
        I: Iterator<Item = Point2<f64>> + Clone,
    {
        self.model_inliers(estimator, data).map(|(model, _)| model)
    }

    fn model_inliers<I>(&mut self, estimator: &E, data: I) -> Option<(E::Model, Self::Inliers)>
    where
        I: Iterator<Item = Point2<f64>> + Clone,
    {
        let points: Vec<Point2<f64>> = data.collect();
        self.fit(estimator, &points)
            .map(|fit| (fit.model, fit.inliers))
    }
}
