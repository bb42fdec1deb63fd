//! Spreadsheet port.

use async_trait::async_trait;

use crate::upstream::domain::UpstreamResult;

/// Reads rows of a maintained spreadsheet.
///
/// Rows and cells are addressed by position only; reordering the sheet
/// changes what callers read.
#[async_trait]
pub trait TabularSource: Send + Sync {
    /// Returns every row of `range` (a sheet name or A1 range) as text
    /// cells. Trailing empty cells may be omitted by the source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError`] on failure.
    async fn rows(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Vec<Vec<String>>>;
}
