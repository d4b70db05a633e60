use async_trait::async_trait;
use tracing::debug;

use super::{Mapper, Resolution};
use crate::{Dependency, Dictionary, Result, template};

/// Resolves links from an operator-supplied [`Dictionary`].
///
/// Names missing from the dictionary are `NotFound`. A present entry whose
/// template cannot be rendered is an error: a broken dictionary is a
/// configuration defect, not a miss.
#[derive(Debug, Clone)]
pub struct DictionaryMapper {
    dictionary: Dictionary,
}

impl DictionaryMapper {
    /// Create a mapper over `dictionary`.
    pub const fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// The dictionary backing this mapper.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

#[async_trait]
impl Mapper for DictionaryMapper {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn map(&self, dependency: &Dependency) -> Result<Resolution> {
        let Some(tpl) = self.dictionary.get(&dependency.name) else {
            return Ok(Resolution::NotFound);
        };

        let link = template::render(tpl, dependency)?;
        debug!(dependency = %dependency.name, %link, "Rendered dictionary link");
        Ok(Resolution::Found(link))
    }
}
