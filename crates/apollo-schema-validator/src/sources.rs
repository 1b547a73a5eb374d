use crate::FileId;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

/// Records the text of a source file that schema or document nodes were declared in
#[derive(Clone)]
pub struct SourceFile {
    pub(crate) path: PathBuf,
    pub(crate) source_text: String,
    pub(crate) source: OnceLock<MappedSource>,
}

pub type SourceMap = Arc<IndexMap<FileId, Arc<SourceFile>>>;

/// Translate byte offsets to ariadne's char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MappedSource {
    ariadne: ariadne::Source,
    map: Vec<u32>,
}

impl MappedSource {
    fn new(input: &str) -> Self {
        let ariadne = ariadne::Source::from(input.to_owned());

        let mut map = vec![0; input.len() + 1];
        let mut char_index = 0;
        for (byte_index, _) in input.char_indices() {
            map[byte_index] = char_index;
            char_index += 1;
        }

        // Support 1 past the end of the string, for use in exclusive ranges.
        map[input.len()] = char_index;

        Self { ariadne, map }
    }

    /// Offsets past the end of the text clamp to the end.
    pub(crate) fn map_index(&self, byte_index: usize) -> usize {
        let last = self.map.len() - 1;
        self.map[byte_index.min(last)] as usize
    }
}

impl SourceFile {
    /// `path` is the filesystem path (or arbitrary string) used in diagnostics
    /// to identify this source file to users.
    pub fn new(path: impl AsRef<Path>, source_text: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            source_text: source_text.into(),
            source: OnceLock::new(),
        }
    }

    /// The filesystem path (or arbitrary string) used in diagnostics
    /// to identify this source file to users.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub(crate) fn ariadne(&self) -> &ariadne::Source {
        &self.mapped_source().ariadne
    }

    pub(crate) fn mapped_source(&self) -> &MappedSource {
        self.source
            .get_or_init(|| MappedSource::new(&self.source_text))
    }

    /// Returns zero-based line and column numbers for the given byte offset
    pub fn get_line_column(&self, index: usize) -> Option<(usize, usize)> {
        let char_index = self.mapped_source().map_index(index);
        let (_, line, column) = self.ariadne().get_offset_line(char_index)?;
        Some((line, column))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            path,
            source_text,
            source: _, // Skipped: it’s a cache and would make debugging other things noisy
        } = self;
        f.debug_struct("SourceFile")
            .field("path", path)
            .field("source_text", source_text)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_column_counts_characters() {
        let file = SourceFile::new("schema.graphql", "type Query {\n  é: Int\n  x: Int\n}");
        assert_eq!(file.get_line_column(0), Some((0, 0)));
        assert_eq!(file.get_line_column(15), Some((1, 2)));
        // `é` is two bytes wide but one character
        let x = file.source_text().find('x').unwrap();
        assert_eq!(file.get_line_column(x), Some((2, 2)));
    }
}
