use super::{
    coordinate::LocationState, feature_record::FeatureRecord, property::PropertyAttributes,
};
use crate::estimator::{DisplayState, Estimator};

/// Everything one user has entered into the form so far.
///
/// Surfaces own one of these per user and hand it to the operations below;
/// nothing here is shared between sessions.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    pub location: LocationState,
    pub attributes: PropertyAttributes,
    pub status: DisplayState,
}

impl FormSession {
    pub fn new() -> Self {
        FormSession::default()
    }

    pub fn feature_record(&self) -> FeatureRecord {
        FeatureRecord::assemble(self.location.current(), &self.attributes)
    }

    /// Runs one calculate action and stores the resulting display state.
    pub fn calculate(&mut self, estimator: &Estimator) -> &DisplayState {
        self.status = estimator.calculate(self.location.current(), &self.attributes);
        &self.status
    }
}
