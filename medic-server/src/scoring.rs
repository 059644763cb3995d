//! Priority scoring for facilities.
//!
//! A score starts at the distance in kilometres and each satisfied
//! criterion in the policy table subtracts its weight. Lower scores are
//! shown first.

use crate::domain::Facility;

/// A condition a facility may satisfy to earn a bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Category is hospital.
    Hospital,
    /// A `phone` or `contact:phone` tag is present.
    HasPhone,
    /// Facility advertises emergency care.
    Emergency,
}

impl Criterion {
    /// Whether the facility satisfies this criterion.
    pub fn applies(&self, facility: &Facility) -> bool {
        match self {
            Criterion::Hospital => facility.category.is_hospital(),
            Criterion::HasPhone => facility.tags.has_contact_phone(),
            Criterion::Emergency => facility.tags.emergency(),
        }
    }
}

/// Policy table mapping criteria to the weight they subtract.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityPolicy {
    weights: Vec<(Criterion, f64)>,
}

impl PriorityPolicy {
    /// A policy with no bonuses: score equals distance.
    pub fn distance_only() -> Self {
        Self {
            weights: Vec::new(),
        }
    }

    /// Add or replace the weight of a criterion.
    pub fn with(mut self, criterion: Criterion, weight: f64) -> Self {
        match self.weights.iter_mut().find(|(c, _)| *c == criterion) {
            Some(entry) => entry.1 = weight,
            None => self.weights.push((criterion, weight)),
        }
        self
    }

    /// The weight for a criterion, if it is in the table.
    pub fn weight(&self, criterion: Criterion) -> Option<f64> {
        self.weights
            .iter()
            .find(|(c, _)| *c == criterion)
            .map(|(_, w)| *w)
    }

    /// Score a facility at the given distance.
    pub fn score(&self, facility: &Facility, distance_km: f64) -> f64 {
        self.weights
            .iter()
            .filter(|(criterion, _)| criterion.applies(facility))
            .fold(distance_km, |score, (_, weight)| score - weight)
    }
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self::distance_only()
            .with(Criterion::Hospital, 2.0)
            .with(Criterion::HasPhone, 1.0)
    }
}

/// Score a facility with the default policy.
pub fn score_priority(facility: &Facility, distance_km: f64) -> f64 {
    PriorityPolicy::default().score(facility, distance_km)
}
