use std::io::Write;

#[derive(Clone, Debug)]
pub struct GlyphGrid {
    pub width: u16,
    pub height: u32,
    pub cells: Vec<char>,
}

impl GlyphGrid {
    pub fn new(width: u16, height: u32, cells: Vec<char>) -> Self {
        assert_eq!(usize::from(width) * height as usize, cells.len());
        Self { width, height, cells }
    }

    pub fn empty(width: u16) -> Self {
        Self { width, height: 0, cells: Vec::new() }
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = usize::from(self.width).max(1);
        self.cells.chunks(width).map(|row| row.iter().collect::<String>())
    }

    /// Writes every row followed by a line break.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> std::io::Result<()> {
        for row in self.rows() {
            writeln!(sink, "{row}")?;
        }
        sink.flush()
    }
}
