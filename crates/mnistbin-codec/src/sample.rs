//! Training view of a decoded record

use crate::layout::{CLASS_COUNT, IMAGE_PIXEL_COUNT};
use crate::record::TextRecord;

/// One-hot label and pixels scaled into `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// `1.0` at the label's class index, `0.0` elsewhere
    pub target: [f32; CLASS_COUNT],
    /// Pixel intensities divided by 255
    pub inputs: Vec<f32>,
}

impl Sample {
    /// Build from a decoded record
    ///
    /// Labels outside `0..CLASS_COUNT` give an all-zero target.
    #[must_use]
    pub fn from_record(record: &TextRecord) -> Self {
        let mut target = [0.0; CLASS_COUNT];
        if let Some(slot) = usize::try_from(record.label())
            .ok()
            .and_then(|i| target.get_mut(i))
        {
            *slot = 1.0;
        }

        let mut inputs = Vec::with_capacity(IMAGE_PIXEL_COUNT);
        inputs.extend(record.pixels().iter().map(|&p| f32::from(p) / 255.0));

        Self { target, inputs }
    }

    /// Index of the hot class, if any
    #[must_use]
    pub fn class(&self) -> Option<usize> {
        self.target.iter().position(|&v| v > 0.5)
    }
}

impl From<&TextRecord> for Sample {
    fn from(record: &TextRecord) -> Self {
        Self::from_record(record)
    }
}
