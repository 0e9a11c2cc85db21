// Weighted multi-field scoring

use serde::{Deserialize, Serialize};
use std::fmt;

/// Searchable entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Entity title
    Title,

    /// Entity body text
    Body,

    /// Entity tags, each matched on its own
    Tags,
}

impl SearchField {
    /// Every field, in scoring order
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Body, SearchField::Tags];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Body => "body",
            SearchField::Tags => "tags",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined distance with its per-field components
///
/// All values are distances: 0 is a perfect match, 1 the weakest. A field
/// component is `None` when the field had no match within the edit budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Score {
    /// Overall distance (0-1)
    pub overall: f32,

    /// Title component
    pub title: Option<f32>,

    /// Body component
    pub body: Option<f32>,

    /// Best tag component
    pub tags: Option<f32>,
}

impl Score {
    /// Component for one field
    pub fn field(&self, field: SearchField) -> Option<f32> {
        match field {
            SearchField::Title => self.title,
            SearchField::Body => self.body,
            SearchField::Tags => self.tags,
        }
    }

    /// Get the overall score
    pub fn value(&self) -> f32 {
        self.overall
    }
}

/// Combines per-field distances with relative field weights
///
/// Each matched field contributes a factor `(d / threshold) ^ (w / W)`, where
/// `W` is the sum of all positive weights and an exact hit counts as
/// `f64::EPSILON` rather than 0. The product is scaled by the threshold, so:
///
/// - the overall score never exceeds the threshold,
/// - another matched field can only lower it,
/// - an exact hit in a heavier field beats one in a lighter field.
#[derive(Debug, Clone)]
pub struct WeightedScorer {
    /// Weight for the title field
    title_weight: f32,

    /// Weight for the body field
    body_weight: f32,

    /// Weight for the tags field
    tags_weight: f32,

    /// Largest field distance that counts as a match
    threshold: f32,
}

impl WeightedScorer {
    /// Create a scorer with the default weights (0.4 / 0.3 / 0.3) and threshold
    pub fn new() -> Self {
        Self {
            title_weight: 0.4,
            body_weight: 0.3,
            tags_weight: 0.3,
            threshold: crate::search::DEFAULT_THRESHOLD,
        }
    }

    /// Set custom weights
    pub fn with_weights(mut self, title: f32, body: f32, tags: f32) -> Self {
        self.title_weight = title;
        self.body_weight = body;
        self.tags_weight = tags;
        self
    }

    /// Set the match threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Weight of one field
    pub fn weight(&self, field: SearchField) -> f32 {
        match field {
            SearchField::Title => self.title_weight,
            SearchField::Body => self.body_weight,
            SearchField::Tags => self.tags_weight,
        }
    }

    fn total_weight(&self) -> f64 {
        SearchField::ALL
            .iter()
            .map(|field| f64::from(self.weight(*field)))
            .filter(|weight| *weight > 0.0)
            .sum()
    }

    /// Combine the distances of the matched fields
    ///
    /// Returns `None` when no field matched or every matched field has zero
    /// weight.
    pub fn score<I>(&self, distances: I) -> Option<Score>
    where
        I: IntoIterator<Item = (SearchField, f32)>,
    {
        let total_weight = self.total_weight();
        if total_weight <= 0.0 {
            return None;
        }

        let threshold = f64::from(self.threshold);
        let mut score = Score::default();
        let mut relevance = 1.0f64;
        let mut matched = false;

        for (field, distance) in distances {
            let distance = distance.clamp(0.0, 1.0);
            match field {
                SearchField::Title => score.title = Some(distance),
                SearchField::Body => score.body = Some(distance),
                SearchField::Tags => score.tags = Some(distance),
            }

            let weight = f64::from(self.weight(field));
            if weight <= 0.0 {
                continue;
            }
            matched = true;

            let ratio = if threshold > 0.0 {
                (f64::from(distance) / threshold).clamp(f64::EPSILON, 1.0)
            } else {
                f64::EPSILON
            };
            relevance *= ratio.powf(weight / total_weight);
        }

        if !matched {
            return None;
        }

        score.overall = ((threshold * relevance) as f32).clamp(0.0, self.threshold);
        Some(score)
    }
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new()
    }
}
