use crate::*;

/// Computes one cursor step in a compass direction. At a board edge the
/// coordinate either wraps to the opposite side or stays put (clamp).
pub(crate) fn step(
    (x, y): Coord2,
    direction: Direction,
    (width, height): Coord2,
    wrap: bool,
) -> Coord2 {
    use Direction::*;

    match direction {
        Left if x > 0 => (x - 1, y),
        Left if wrap => (width - 1, y),
        Right if x + 1 < width => (x + 1, y),
        Right if wrap => (0, y),
        Up if y > 0 => (x, y - 1),
        Up if wrap => (x, height - 1),
        Down if y + 1 < height => (x, y + 1),
        Down if wrap => (x, 0),
        _ => (x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    const SIZE: Coord2 = (120, 100);

    #[test]
    fn steps_move_one_tile_inside_the_board() {
        assert_eq!(step((10, 10), Right, SIZE, false), (11, 10));
        assert_eq!(step((10, 10), Left, SIZE, false), (9, 10));
        assert_eq!(step((10, 10), Up, SIZE, false), (10, 9));
        assert_eq!(step((10, 10), Down, SIZE, false), (10, 11));
    }

    #[test]
    fn clamped_steps_stick_to_the_edge() {
        assert_eq!(step((0, 0), Left, SIZE, false), (0, 0));
        assert_eq!(step((0, 0), Up, SIZE, false), (0, 0));
        assert_eq!(step((119, 99), Right, SIZE, false), (119, 99));
        assert_eq!(step((119, 99), Down, SIZE, false), (119, 99));
    }

    #[test]
    fn wrapping_steps_cross_to_the_opposite_edge() {
        assert_eq!(step((0, 0), Left, SIZE, true), (119, 0));
        assert_eq!(step((0, 0), Up, SIZE, true), (0, 99));
        assert_eq!(step((119, 99), Right, SIZE, true), (0, 99));
        assert_eq!(step((119, 99), Down, SIZE, true), (119, 0));
    }
}
