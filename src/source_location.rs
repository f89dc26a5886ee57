#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Resolves a byte offset into a 1-based line and column.
    pub fn from_offset(content: &str, offset: usize) -> Self {
        let line_info = Self::compute_line_info(content);
        let (line, column) = Self::calculate_position(offset, &line_info);
        Self::new(line, column)
    }

    fn compute_line_info(content: &str) -> LineInfo {
        let mut line_starts = vec![0];
        for (pos, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(pos + 1);
            }
        }

        LineInfo {
            line_starts,
            content_length: content.len(),
        }
    }

    fn calculate_position(pos: usize, info: &LineInfo) -> (u32, u32) {
        if pos > info.content_length {
            return (0, 0);
        }

        let line_idx = match info.line_starts.binary_search(&pos) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };

        let line = (line_idx + 1) as u32;
        let column = (pos - info.line_starts[line_idx] + 1) as u32;

        (line, column)
    }
}

#[derive(Debug)]
struct LineInfo {
    line_starts: Vec<usize>,
    content_length: usize,
}
