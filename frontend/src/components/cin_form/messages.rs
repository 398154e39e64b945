use common::error::FormError;
use common::model::client_config::ClientConfig;
use common::model::record::Record;
use common::model::upload::SelectedFile;
use common::workflow::BatchReport;

pub enum Msg {
    SetConfig(ClientConfig),
    /// `None` when the picker was emptied.
    FileChosen(Option<web_sys::File>),
    FileLoaded(SelectedFile),
    FileUnreadable(String),
    Extract,
    Extracted(Result<Vec<Record>, FormError>),
    EditField {
        index: usize,
        key: String,
        value: String,
    },
    FocusField,
    Save,
    Saved(BatchReport),
    Return,
}
