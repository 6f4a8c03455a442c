use crate::error::ConfigError;
use crate::tracker::Bgr;

/// Detector class tables: class index to label and to display colour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassTable {
    labels: Vec<String>,
    colours: Vec<Bgr>,
}

impl ClassTable {
    pub fn new<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
        colours: impl IntoIterator<Item = Bgr>,
    ) -> Result<Self, ConfigError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let colours: Vec<Bgr> = colours.into_iter().collect();
        if labels.len() != colours.len() {
            return Err(ConfigError::TableLengthMismatch {
                labels: labels.len(),
                colours: colours.len(),
            });
        }
        Ok(Self { labels, colours })
    }

    pub fn label(&self, class_index: usize) -> Option<&str> {
        self.labels.get(class_index).map(String::as_str)
    }

    pub fn colour(&self, class_index: usize) -> Option<Bgr> {
        self.colours.get(class_index).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
