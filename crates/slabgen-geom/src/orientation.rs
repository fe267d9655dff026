/// Cardinal facing on the horizontal plane.
///
/// Horizontal indices follow the cyclic order East → South → West → North → East,
/// so one index step is one clockwise quarter turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Orientation {
    South,
    West,
    North,
    East,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::South,
        Orientation::West,
        Orientation::North,
        Orientation::East,
    ];

    #[inline]
    pub const fn horizontal_index(self) -> usize {
        match self {
            Orientation::South => 0,
            Orientation::West => 1,
            Orientation::North => 2,
            Orientation::East => 3,
        }
    }

    #[inline]
    pub const fn from_horizontal_index(index: usize) -> Orientation {
        Self::ALL[index % 4]
    }

    /// Clockwise quarter turns needed to go from `self` to `to`, always in `0..4`.
    #[inline]
    pub const fn steps_to(self, to: Orientation) -> usize {
        (to.horizontal_index() + 4 - self.horizontal_index()) % 4
    }

    #[inline]
    pub const fn rotated_cw(self) -> Orientation {
        Self::from_horizontal_index(self.horizontal_index() + 1)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Orientation::South => "south",
            Orientation::West => "west",
            Orientation::North => "north",
            Orientation::East => "east",
        }
    }

    pub fn from_name(s: &str) -> Option<Orientation> {
        Self::ALL.into_iter().find(|o| o.name() == s)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cyclic_order_is_east_south_west_north() {
        assert_eq!(Orientation::East.rotated_cw(), Orientation::South);
        assert_eq!(Orientation::South.rotated_cw(), Orientation::West);
        assert_eq!(Orientation::West.rotated_cw(), Orientation::North);
        assert_eq!(Orientation::North.rotated_cw(), Orientation::East);
    }

    #[test]
    fn names_roundtrip() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_name(o.name()), Some(o));
        }
        assert_eq!(Orientation::from_name("up"), None);
    }

    proptest! {
        #[test]
        fn steps_are_normalized(a: Orientation, b: Orientation) {
            let s = a.steps_to(b);
            prop_assert!(s < 4);
            prop_assert_eq!((a.steps_to(b) + b.steps_to(a)) % 4, 0);
        }

        #[test]
        fn stepping_reaches_target(a: Orientation, b: Orientation) {
            let mut cur = a;
            for _ in 0..a.steps_to(b) {
                cur = cur.rotated_cw();
            }
            prop_assert_eq!(cur, b);
        }
    }
}
