use metrica_protocol::Syllable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// A syllable outside every foot
    Unfooted(Syllable),
    /// A parenthesised foot
    Foot(Vec<Syllable>),
    /// An angle-bracketed extrametrical syllable
    Extrametrical(Syllable),
}

impl SegmentKind {
    pub fn syllables(&self) -> &[Syllable] {
        match self {
            SegmentKind::Unfooted(s) | SegmentKind::Extrametrical(s) => std::slice::from_ref(s),
            SegmentKind::Foot(syllables) => syllables,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub span: Span,
    pub kind: SegmentKind,
}
