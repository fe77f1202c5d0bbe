//! Correlation-derived stat weights.

use crate::models::{StatColumn, WithOutcome};
use crate::stats::pearson;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Tolerance for the sum-to-one check on derived weights
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How a weight table was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightDerivation {
    /// |correlation| with the outcome, renormalized to sum to 1.0
    Correlation,
    /// Every correlation was undefined or zero; 1 / stat count each
    Uniform,
    /// Every stat contributes with weight 1.0 (team defenses)
    EqualContribution,
}

/// Weight per stat column. One entry for every column of the kind.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable<S: StatColumn> {
    weights: BTreeMap<S, f64>,
    signals: BTreeMap<S, f64>,
    derivation: WeightDerivation,
}

impl<S: StatColumn> WeightTable<S> {
    /// Renormalize per-stat signals into weights summing to 1.0.
    ///
    /// Falls back to uniform weights when the signals sum to zero.
    pub fn from_signals(signals: BTreeMap<S, f64>) -> Self {
        let signals: BTreeMap<S, f64> = S::ALL
            .iter()
            .map(|stat| {
                let signal = signals.get(stat).copied().unwrap_or(0.0);
                (*stat, if signal.is_finite() { signal.abs() } else { 0.0 })
            })
            .collect();

        let total: f64 = signals.values().sum();
        if total > 0.0 {
            let weights = signals.iter().map(|(stat, signal)| (*stat, signal / total)).collect();
            Self { weights, signals, derivation: WeightDerivation::Correlation }
        } else {
            let mut table = Self::uniform();
            table.signals = signals;
            table
        }
    }

    /// 1 / stat count for every stat
    pub fn uniform() -> Self {
        let weight = 1.0 / S::ALL.len() as f64;
        Self {
            weights: S::ALL.iter().map(|stat| (*stat, weight)).collect(),
            signals: S::ALL.iter().map(|stat| (*stat, 0.0)).collect(),
            derivation: WeightDerivation::Uniform,
        }
    }

    /// Weight 1.0 for every stat, so the composite is a plain sum of z-scores
    pub fn equal_contribution() -> Self {
        Self {
            weights: S::ALL.iter().map(|stat| (*stat, 1.0)).collect(),
            signals: S::ALL.iter().map(|stat| (*stat, 0.0)).collect(),
            derivation: WeightDerivation::EqualContribution,
        }
    }

    pub fn get(&self, stat: S) -> Option<f64> {
        self.weights.get(&stat).copied()
    }

    /// Absolute correlation the weight was derived from (0.0 if undefined)
    pub fn signal(&self, stat: S) -> Option<f64> {
        self.signals.get(&stat).copied()
    }

    /// Weights in fixed column order
    pub fn iter(&self) -> impl Iterator<Item = (S, f64)> + '_ {
        self.weights.iter().map(|(stat, weight)| (*stat, *weight))
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn derivation(&self) -> WeightDerivation {
        self.derivation
    }

    /// Check that derived weights are non-negative and sum to ~1.0
    pub fn validate(&self) -> bool {
        let non_negative = self.weights.values().all(|w| *w >= 0.0);
        match self.derivation {
            WeightDerivation::EqualContribution => non_negative,
            _ => non_negative && (self.total() - 1.0).abs() < WEIGHT_SUM_TOLERANCE,
        }
    }
}

/// Derives stat weights by correlating each stat with the outcome metric
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightCalculator;

impl WeightCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculate |Pearson r| of every stat against the outcome, normalized
    /// to sum to 1.0. Entities missing either value are left out of that
    /// stat's correlation only.
    pub fn calculate<E: WithOutcome>(&self, population: &[E]) -> WeightTable<E::Stat> {
        info!("Calculating stat weights for {} entities", population.len());

        let mut signals = BTreeMap::new();
        for stat in <E::Stat as StatColumn>::ALL {
            let pairs: Vec<(f64, f64)> = population
                .iter()
                .filter_map(|entity| Some((entity.stat(*stat)?, entity.outcome()?)))
                .collect();

            let signal = match pearson(&pairs) {
                Some(r) => r.abs(),
                None => {
                    debug!(
                        "Correlation undefined for {} over {} pairs, using signal 0",
                        stat.name(),
                        pairs.len()
                    );
                    0.0
                }
            };
            signals.insert(*stat, signal);
        }

        let table = WeightTable::from_signals(signals);
        if table.derivation() == WeightDerivation::Uniform {
            info!("No usable correlations, falling back to uniform weights");
        }
        for (stat, weight) in table.iter() {
            debug!("Weight {}: {:.4}", stat.name(), weight);
        }
        table
    }
}
