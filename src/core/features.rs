use std::collections::HashSet;

use crate::models::Profile;

/// Number of features produced for a student-mentor pair
pub const FEATURE_COUNT: usize = 7;

/// Position of each feature in a [`FeatureVector`]
pub mod index {
    pub const SHARED_SKILLS: usize = 0;
    pub const INDUSTRY_MATCH: usize = 1;
    pub const SHARED_INTERESTS: usize = 2;
    pub const LOCATION_MATCH: usize = 3;
    pub const EXPERIENCE_DIFF: usize = 4;
    pub const MENTOR_RATING: usize = 5;
    pub const MENTOR_MENTEES: usize = 6;
}

/// Numeric summary of a student-mentor pair
///
/// Order: shared skills, industry match, shared interests, location match,
/// experience difference, mentor rating, mentor mentee count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Build the feature vector for a student-mentor pair
///
/// Skills and interests are compared case-insensitively as sets. Industry
/// matches only when both sides carry the same identifier; location is an
/// exact string comparison and a missing location never matches.
pub fn extract_features(student: &Profile, mentor: &Profile) -> FeatureVector {
    let shared_skills = shared_count(student.skill_names(), mentor.skill_names());
    let shared_interests = shared_count(student.interests(), mentor.interests());

    let industry_match = match (student.industry_id(), mentor.industry_id()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    let location_match = match (student.location(), mentor.location()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    let experience_diff = (student.experience() - mentor.experience()).abs();

    FeatureVector([
        shared_skills as f64,
        indicator(industry_match),
        shared_interests as f64,
        indicator(location_match),
        experience_diff,
        mentor.rating_or_default(),
        mentor.mentees_or_default() as f64,
    ])
}

/// Size of the intersection of two name sets after lower-casing
fn shared_count<'a>(
    left: impl Iterator<Item = &'a str>,
    right: impl Iterator<Item = &'a str>,
) -> usize {
    let left: HashSet<String> = left.map(str::to_lowercase).collect();
    let right: HashSet<String> = right.map(str::to_lowercase).collect();
    left.intersection(&right).count()
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}
