use std::fmt;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Offsets of the eight surrounding tiles, scan order west-to-east.
    pub const NEIGHBORS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by the given tile deltas.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (king-move) distance to another position.
    ///
    /// This is the distance metric the game uses for adjacency: a monster
    /// one diagonal step away is at distance 1.
    pub const fn chebyshev(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }

    /// Squared Euclidean distance to another position.
    ///
    /// Used for annulus membership checks in the landing-safety samplers,
    /// where comparing squared distances avoids any floating point.
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Iterates the eight neighboring positions.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Self::NEIGHBORS
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete game-turn counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Turns elapsed since `earlier`, saturating at zero if `earlier` is
    /// in the future.
    pub const fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource meter (health, spell points) tracked on the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Current value as a percentage of the maximum (0-100).
    ///
    /// A zero maximum reads as 100 so that characters without the resource
    /// (a warrior's spell points) never register as "drained".
    pub const fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 100;
        }
        self.current * 100 / self.maximum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_counts_diagonals_as_one() {
        let a = Position::new(5, 5);
        assert_eq!(a.chebyshev(Position::new(6, 6)), 1);
        assert_eq!(a.chebyshev(Position::new(8, 4)), 3);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn neighbors_yields_eight_distinct_tiles() {
        let center = Position::new(3, 3);
        let all: Vec<_> = center.neighbors().collect();
        assert_eq!(all.len(), 8);
        assert!(all.iter().all(|&p| center.chebyshev(p) == 1));
    }

    #[test]
    fn meter_percent_guards_zero_maximum() {
        assert_eq!(ResourceMeter::new(0, 0).percent(), 100);
        assert_eq!(ResourceMeter::new(25, 100).percent(), 25);
        assert_eq!(ResourceMeter::new(3, 9).percent(), 33);
    }

    #[test]
    fn tick_since_saturates() {
        assert_eq!(Tick(100).since(Tick(60)), 40);
        assert_eq!(Tick(10).since(Tick(60)), 0);
    }
}
