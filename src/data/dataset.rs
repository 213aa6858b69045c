use burn::data::dataset::Dataset;

use crate::domain::review::LabeledReview;

/// In-memory split of labelled reviews (train or test).
pub struct ReviewDataset {
    reviews: Vec<LabeledReview>,
}

impl ReviewDataset {
    pub fn new(reviews: Vec<LabeledReview>) -> Self { Self { reviews } }

    pub fn review_count(&self) -> usize { self.reviews.len() }
}

impl Dataset<LabeledReview> for ReviewDataset {
    fn get(&self, index: usize) -> Option<LabeledReview> {
        self.reviews.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.reviews.len()
    }
}
