use super::constants::{HARVEST_SEGMENT, PERIOD};

/// A parsed dot path such as `a.b.2.c`.
///
/// Segments stay as text: whether a segment is an object key or an array
/// index is only known once the scanner sees the container it addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<'p> {
    segments: Vec<&'p str>,
    harvest: bool,
}

impl<'p> Path<'p> {
    /// Splits on `.`, dropping empty segments. A final `-1` turns the path
    /// into a harvest of every child of the container it reaches.
    pub fn parse(path: &'p str) -> Self {
        let mut segments: Vec<&'p str> = path.split(PERIOD).filter(|s| !s.is_empty()).collect();
        let harvest = segments.last() == Some(&HARVEST_SEGMENT);
        if harvest {
            segments.pop();
        }
        Path { segments, harvest }
    }

    /// Harvest every child of the container at `path`.
    pub fn harvest(path: &'p str) -> Self {
        Path {
            harvest: true,
            ..Path::parse(path)
        }
    }

    pub fn segments(&self) -> &[&'p str] {
        &self.segments
    }

    pub fn segment(&self, level: usize) -> Option<&'p str> {
        self.segments.get(level).copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && !self.harvest
    }

    pub fn is_harvest(&self) -> bool {
        self.harvest
    }
}
