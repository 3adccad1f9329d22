use crate::archetype::Archetype;
use serde::Serialize;

/// Archetype counts of one team and the threat scores derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCompositionProfile {
    pub tanks: u32,
    pub assassins: u32,
    pub enchanters: u32,
    pub mages: u32,
    pub fighters: u32,
    pub marksmen: u32,
    pub tankiness: f64,
    pub burst: f64,
    pub poke: f64,
    pub engage: f64,
}

impl TeamCompositionProfile {
    pub fn from_archetypes(archetypes: impl IntoIterator<Item = Archetype>) -> Self {
        let mut profile = Self::default();
        for archetype in archetypes {
            match archetype {
                Archetype::Tank => profile.tanks += 1,
                Archetype::Assassin => profile.assassins += 1,
                Archetype::Enchanter => profile.enchanters += 1,
                Archetype::Mage => profile.mages += 1,
                Archetype::Fighter => profile.fighters += 1,
                Archetype::Marksman => profile.marksmen += 1,
                Archetype::Generic => {}
            }
        }

        let [tanks, assassins, enchanters, mages, fighters, marksmen] = [
            profile.tanks,
            profile.assassins,
            profile.enchanters,
            profile.mages,
            profile.fighters,
            profile.marksmen,
        ]
        .map(f64::from);
        profile.tankiness = capped(0.4 * tanks + 0.15 * fighters);
        profile.burst = capped(0.35 * assassins + 0.2 * mages + 0.1 * fighters);
        profile.poke = capped(0.3 * mages + 0.15 * marksmen + 0.1 * enchanters);
        profile.engage = capped(0.35 * tanks + 0.2 * fighters + 0.1 * assassins);
        profile
    }
}

fn capped(score: f64) -> f64 {
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_composition() {
        let profile = TeamCompositionProfile::from_archetypes([
            Archetype::Fighter,
            Archetype::Tank,
            Archetype::Mage,
            Archetype::Marksman,
            Archetype::Enchanter,
        ]);
        assert_eq!((profile.tanks, profile.fighters, profile.mages), (1, 1, 1));
        assert!((profile.tankiness - 0.55).abs() < 1e-9);
        assert!((profile.burst - 0.3).abs() < 1e-9);
        assert!((profile.poke - 0.55).abs() < 1e-9);
        assert!((profile.engage - 0.55).abs() < 1e-9);
    }

    #[test]
    fn scores_are_capped() {
        let profile = TeamCompositionProfile::from_archetypes([Archetype::Tank; 5]);
        assert_eq!(profile.tankiness, 1.0);
        assert_eq!(profile.engage, 1.0);
        assert_eq!(profile.burst, 0.0);
    }

    #[test]
    fn generic_is_not_counted() {
        let profile = TeamCompositionProfile::from_archetypes([Archetype::Generic; 5]);
        assert_eq!(profile, TeamCompositionProfile::default());
    }

    #[test]
    fn recomputing_is_idempotent() {
        let team = [Archetype::Assassin, Archetype::Assassin, Archetype::Mage];
        assert_eq!(
            TeamCompositionProfile::from_archetypes(team),
            TeamCompositionProfile::from_archetypes(team)
        );
    }
}
