use crate::core::scoring::POINTS_SYSTEM;
use crate::core::season::Tally;

/// Rating of every driver before the first race.
pub const NEUTRAL_RATING: f64 = 5.0;
pub const MAX_RATING: f64 = 10.0;

// weights of the rating components, they sum up to MAX_RATING
const W_POINTS: f64 = 5.0;
const W_WINS: f64 = 3.0;
const W_PODIUMS: f64 = 2.0;

/// calc_rating returns a 0-10 quality score for a driver on the basis of its accumulated
/// statistics relative to the number of completed races.
///
/// * `points_ratio` - total points / (races * points for a win), capped at 1.0
/// * `win_ratio` - wins / races
/// * `podium_ratio` - podiums / races
///
/// rating = 5 * points_ratio + 3 * win_ratio + 2 * podium_ratio
pub fn calc_rating(tally: &Tally, races_completed: u32) -> f64 {
    if races_completed == 0 {
        return NEUTRAL_RATING;
    }

    let races = races_completed as f64;
    let points_ratio = (tally.points as f64 / (races * POINTS_SYSTEM[0] as f64)).min(1.0);
    let win_ratio = tally.wins as f64 / races;
    let podium_ratio = tally.podiums as f64 / races;

    (points_ratio * W_POINTS + win_ratio * W_WINS + podium_ratio * W_PODIUMS).clamp(0.0, MAX_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn neutral_without_races() {
        let tally = Tally { points: 0, wins: 0, podiums: 0 };
        assert_eq!(calc_rating(&tally, 0), NEUTRAL_RATING);
    }

    #[test]
    fn mixed_record() {
        let tally = Tally { points: 50, wins: 2, podiums: 3 };
        assert_relative_eq!(calc_rating(&tally, 5), 4.4, epsilon = 1e-12);
    }

    #[test]
    fn perfect_record_reaches_maximum() {
        let tally = Tally { points: 75, wins: 3, podiums: 3 };
        assert_relative_eq!(calc_rating(&tally, 3), MAX_RATING);
    }

    #[test]
    fn scoreless_record_is_zero() {
        let tally = Tally { points: 0, wins: 0, podiums: 0 };
        assert_relative_eq!(calc_rating(&tally, 4), 0.0);
    }

    #[test]
    fn inconsistent_tally_is_clamped() {
        let tally = Tally { points: 500, wins: 9, podiums: 9 };
        assert_relative_eq!(calc_rating(&tally, 2), MAX_RATING);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rating_stays_in_bounds(
                races in 1u32..200,
                win_frac in 0.0f64..=1.0,
                podium_extra in 0.0f64..=1.0
            ) {
                let wins = (races as f64 * win_frac) as u32;
                let podiums = wins + ((races - wins) as f64 * podium_extra) as u32;
                // at most a win per race, everything else at most P2
                let points = wins * 25 + (podiums - wins) * 18;
                let tally = Tally { points, wins, podiums };

                let rating = calc_rating(&tally, races);
                prop_assert!((0.0..=MAX_RATING).contains(&rating));
            }
        }
    }
}
