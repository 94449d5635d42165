use crate::crawler::CrawlResult;
use crate::output::OutputResult;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `result` as pretty-printed JSON followed by a newline
///
/// # Example
///
/// ```
/// use wordtide::crawler::CrawlResult;
/// use wordtide::output::write_result;
///
/// let result = CrawlResult {
///     word_counts: vec![("rust".to_string(), 12)],
///     urls_visited: 3,
/// };
///
/// let mut out = Vec::new();
/// write_result(&result, &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("\"urlsVisited\": 3"));
/// ```
pub fn write_result<W: Write>(result: &CrawlResult, writer: &mut W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Appends `result` to the file at `path`, creating it if needed
pub fn write_result_to_path(result: &CrawlResult, path: &Path) -> OutputResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_result(result, &mut writer)
}
