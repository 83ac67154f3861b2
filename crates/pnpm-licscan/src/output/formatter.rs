use licscan_core::ScanResult;

use crate::error::Result;

pub(crate) trait ScanFormatter {
    fn format_scan(&self, result: &ScanResult) -> Result<String>;
}
