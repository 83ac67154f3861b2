mod formatter;
mod json;
mod plain;

use clap::ValueEnum;

pub(crate) use formatter::ScanFormatter;
pub(crate) use json::JsonFormatter;
pub(crate) use plain::PlainTextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// The full scan result as JSON
    Json,
    /// A per-project and per-license summary
    Plain,
}

impl OutputFormat {
    pub(crate) fn formatter(self) -> Box<dyn ScanFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Plain => Box::new(PlainTextFormatter),
        }
    }
}
