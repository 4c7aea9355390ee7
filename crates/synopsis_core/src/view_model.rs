use crate::{PipelineResult, StageRow};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub input_enabled: bool,
    pub can_submit: bool,
    pub input_error: Option<String>,
    pub address: Option<String>,
    pub stages_visible: bool,
    pub stages: Vec<StageRow>,
    pub running: bool,
    pub error: Option<String>,
    pub result: Option<ResultView>,
    pub show_translation: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub title: String,
    pub source_url: String,
    pub synopsis: String,
    /// Present only while the translation is toggled on.
    pub translation: Option<String>,
    pub word_count: u64,
    pub author: Option<String>,
    pub created_at: String,
}

impl ResultView {
    pub(crate) fn new(result: &PipelineResult, show_translation: bool) -> Self {
        Self {
            title: result.title.clone(),
            source_url: result.source_url.clone(),
            synopsis: result.synopsis.clone(),
            translation: show_translation.then(|| result.translation.clone()),
            word_count: result.word_count,
            author: result.author.clone(),
            created_at: result.created_at.clone(),
        }
    }
}
