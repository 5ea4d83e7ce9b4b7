use std::{collections::VecDeque, path::Path};

use nijie_core::nalgebra::Point2;

/// Ordered list of targets.
pub struct Program(VecDeque<Point2<f64>>);

impl Program {
    /// Load a program from a JSON array of `[x, y]` targets.
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let str = std::fs::read_to_string(path)?;
        Ok(Self::parse(&str)?)
    }

    pub fn parse(str: &str) -> serde_json::Result<Self> {
        let targets = serde_json::from_str::<Vec<[f64; 2]>>(str)?
            .iter()
            .map(|[x, y]| Point2::new(*x, *y))
            .collect();

        Ok(Self(targets))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Iterator for Program {
    type Item = Point2<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }
}

impl FromIterator<Point2<f64>> for Program {
    fn from_iter<T: IntoIterator<Item = Point2<f64>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_targets() {
        let mut program = Program::parse("[[0.4, 0.0], [-0.2, 0.35], [1, 1]]").unwrap();

        assert_eq!(program.len(), 3);
        assert_eq!(program.next(), Some(Point2::new(0.4, 0.0)));
        assert_eq!(program.next(), Some(Point2::new(-0.2, 0.35)));
        assert_eq!(program.next(), Some(Point2::new(1.0, 1.0)));
        assert_eq!(program.next(), None);
        assert!(program.is_empty());
    }

    #[test]
    fn parse_empty() {
        assert!(Program::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_malformed() {
        assert!(Program::parse("[[0.4]]").is_err());
        assert!(Program::parse("{\"x\": 0.4}").is_err());
    }

    #[test]
    fn collect_targets() {
        let program: Program = [Point2::new(0.1, 0.2)].into_iter().collect();
        assert_eq!(program.len(), 1);
    }
}
