use licscan_core::ScanResult;

use super::ScanFormatter;
use crate::error::Result;

pub(crate) struct JsonFormatter;

impl ScanFormatter for JsonFormatter {
    fn format_scan(&self, result: &ScanResult) -> Result<String> {
        let mut output = serde_json::to_string_pretty(result)?;
        output.push('\n');
        Ok(output)
    }
}
