use std::ops::{Add, AddAssign, Range};

pub type File = usize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub file: File,
}

impl Span {
    pub fn new(file: File, start: usize, end: usize) -> Self {
        Self { start, end, file }
    }
}

impl Add<Span> for Span {
    type Output = Span;

    fn add(self, rhs: Span) -> Self::Output {
        assert_eq!(self.file, rhs.file);
        Self::new(self.file, self.start.min(rhs.start), self.end.max(rhs.end))
    }
}

impl AddAssign<Span> for Span {
    fn add_assign(&mut self, rhs: Span) {
        *self = *self + rhs;
    }
}

impl From<Span> for Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}
