//! Pitching staff: fatigue and bullpen moves.

use super::config::PitchingConfig;
use super::plate_appearance::{MAX_GRADE, MIN_GRADE};
use super::state::TeamState;
use crate::models::{PitchingProfile, PlayerId};

/// Grade after fatigue: every full inning past endurance costs
/// `fatigue_grade_penalty` points.
pub fn effective_grade(profile: &PitchingProfile, outs_recorded: u32, cfg: &PitchingConfig) -> u8 {
    let innings = outs_recorded / 3;
    let beyond = innings.saturating_sub(profile.endurance as u32);
    let penalty = beyond.saturating_mul(cfg.fatigue_grade_penalty as u32);
    let grade = (profile.grade as u32).saturating_sub(penalty);
    grade.clamp(MIN_GRADE as u32, MAX_GRADE as u32) as u8
}

pub fn is_fatigued(profile: &PitchingProfile, outs_recorded: u32) -> bool {
    outs_recorded >= profile.endurance as u32 * 3
}

/// A save situation for the fielding side: ahead by 1..=`save_lead_max`.
pub fn is_save_situation(lead: i64, cfg: &PitchingConfig) -> bool {
    lead >= 1 && lead <= cfg.save_lead_max as i64
}

/// First bullpen arm that has not pitched, skipping the closer.
pub fn next_reliever(team: &TeamState) -> Option<PlayerId> {
    team.bullpen
        .iter()
        .find(|id| Some(*id) != team.closer.as_ref() && !team.has_pitched(id))
        .cloned()
}

/// The active pitcher should come out before the next batter.
pub fn should_pull(profile: &PitchingProfile, team: &TeamState, cfg: &PitchingConfig) -> bool {
    is_fatigued(profile, team.pitcher_outs)
        || team.baserunner_streak >= cfg.pull_after_consecutive_baserunners
}

/// Closer who should take the mound at the start of a late half inning.
pub fn closer_due(
    team: &TeamState,
    inning: u32,
    regulation_innings: u32,
    lead: i64,
    cfg: &PitchingConfig,
) -> Option<PlayerId> {
    if inning < regulation_innings || !is_save_situation(lead, cfg) {
        return None;
    }
    let closer = team.closer.as_ref()?;
    if team.has_pitched(closer) {
        return None;
    }
    Some(closer.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::Side;

    fn profile(grade: u8, endurance: u8) -> PitchingProfile {
        PitchingProfile { grade, endurance }
    }

    fn home_staff() -> TeamState {
        TeamState::from_roster(Side::Home, &fixtures::sample_team("Home", "h"))
    }

    #[test]
    fn test_grade_decays_past_endurance() {
        let cfg = PitchingConfig::default();
        let p = profile(20, 6);
        assert_eq!(effective_grade(&p, 0, &cfg), 20);
        assert_eq!(effective_grade(&p, 18, &cfg), 20);
        assert_eq!(effective_grade(&p, 21, &cfg), 18);
        assert_eq!(effective_grade(&p, 27, &cfg), 14);
    }

    #[test]
    fn test_grade_floor_is_one() {
        let cfg = PitchingConfig::default();
        assert_eq!(effective_grade(&profile(3, 1), 30, &cfg), 1);
        assert_eq!(effective_grade(&profile(40, 6), 0, &cfg), 30);
    }

    #[test]
    fn test_fatigue_threshold() {
        let p = profile(15, 6);
        assert!(!is_fatigued(&p, 17));
        assert!(is_fatigued(&p, 18));
    }

    #[test]
    fn test_next_reliever_skips_closer_and_used_arms() {
        let mut team = home_staff();
        assert_eq!(next_reliever(&team), Some("h_rp1".to_string()));
        team.change_pitcher("h_rp1".into());
        assert_eq!(next_reliever(&team), Some("h_rp2".to_string()));
        team.change_pitcher("h_rp2".into());
        team.change_pitcher("h_rp3".into());
        assert_eq!(next_reliever(&team), None);
    }

    #[test]
    fn test_pull_on_baserunner_streak() {
        let cfg = PitchingConfig::default();
        let mut team = home_staff();
        let p = profile(15, 6);
        assert!(!should_pull(&p, &team, &cfg));
        team.baserunner_streak = 3;
        assert!(should_pull(&p, &team, &cfg));
    }

    #[test]
    fn test_closer_only_in_late_save_spots() {
        let cfg = PitchingConfig::default();
        let team = home_staff();
        assert_eq!(closer_due(&team, 9, 9, 2, &cfg), Some("h_cl".to_string()));
        assert_eq!(closer_due(&team, 8, 9, 2, &cfg), None);
        assert_eq!(closer_due(&team, 9, 9, 4, &cfg), None);
        assert_eq!(closer_due(&team, 9, 9, 0, &cfg), None);

        let mut used = team.clone();
        used.change_pitcher("h_cl".into());
        assert_eq!(closer_due(&used, 10, 9, 1, &cfg), None);
    }
}
