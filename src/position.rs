#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The up-to-8 surrounding coordinates, without bounds filtering.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(Position::new(self.x + dx, self.y + dy))
                }
            })
        })
    }

    /// Whether this position lies on a square `dim x dim` board.
    pub fn in_bounds(&self, dim: u32) -> bool {
        self.x >= 0 && self.x < dim as i32 && self.y >= 0 && self.y < dim as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_interior() {
        let pos = Position::new(1, 1);
        let neighbors: Vec<Position> = pos.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&Position::new(0, 0)));
        assert!(neighbors.contains(&Position::new(2, 2)));
        assert!(!neighbors.contains(&pos));
    }

    #[test]
    fn test_corner_bounds() {
        let corner = Position::new(0, 0);
        let in_bounds: Vec<Position> = corner.neighbors().filter(|p| p.in_bounds(3)).collect();

        assert_eq!(in_bounds.len(), 3);
        assert!(in_bounds.contains(&Position::new(1, 0)));
        assert!(in_bounds.contains(&Position::new(0, 1)));
        assert!(in_bounds.contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(!Position::new(-1, 0).in_bounds(5));
        assert!(!Position::new(5, 0).in_bounds(5));
        assert!(Position::new(4, 4).in_bounds(5));
    }
}
