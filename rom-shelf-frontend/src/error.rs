/// Errors that can occur while reading or writing gamelist sidecars.
#[derive(Debug, thiserror::Error)]
pub enum GamelistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),
}
