//! Label Decoding - class index → outcome name

use std::path::Path;

/// Class order the model was trained with.
///
/// Hard-coded rather than read from the training label encoder; a
/// `LABELS_PATH` file overrides it when the real order is known.
pub const DEFAULT_CLASSES: [&str; 3] = ["Dropout", "Graduate", "Enrolled"];

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("class index {index} out of range for {count} classes")]
    OutOfRange { index: usize, count: usize },

    #[error("model output has no comparable scores")]
    NoScores,

    #[error("label list is empty")]
    Empty,

    #[error("failed to read labels: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid label file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Index of the highest score; ties go to the lowest index, NaN never wins.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Ordered class names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self, LabelError> {
        if classes.is_empty() {
            return Err(LabelError::Empty);
        }
        Ok(Self { classes })
    }

    /// Load a JSON array of class names
    pub fn load(path: &Path) -> Result<Self, LabelError> {
        let classes: Vec<String> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let decoder = Self::new(classes)?;
        log::info!("Loaded {} class labels from {}: {:?}", decoder.len(), path.display(), decoder.classes);
        Ok(decoder)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn decode(&self, index: usize) -> Result<&str, LabelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(LabelError::OutOfRange { index, count: self.classes.len() })
    }

    /// Arg-max over model scores, then decode
    pub fn decode_scores(&self, scores: &[f32]) -> Result<(usize, &str), LabelError> {
        let index = argmax(scores).ok_or(LabelError::NoScores)?;
        Ok((index, self.decode(index)?))
    }
}

impl Default for LabelDecoder {
    fn default() -> Self {
        Self {
            classes: DEFAULT_CLASSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
