/// Championship points for positions 1 to 10, all other positions score nothing.
pub const POINTS_SYSTEM: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Sum of all points handed out in a race with at least ten finishers.
pub const MAX_POINTS_PER_RACE: u32 = 101;

/// Number of positions that count as a podium finish.
pub const PODIUM_POSITIONS: usize = 3;

/// points_for_position returns the championship points for a 1-based finishing position.
pub fn points_for_position(pos: i64) -> u32 {
    if pos >= 1 && pos <= POINTS_SYSTEM.len() as i64 {
        POINTS_SYSTEM[pos as usize - 1]
    } else {
        0
    }
}

pub fn is_win(pos: i64) -> bool {
    pos == 1
}

/// Positions below 1 do not exist and are therefore not a podium.
pub fn is_podium(pos: i64) -> bool {
    pos >= 1 && pos <= PODIUM_POSITIONS as i64
}
