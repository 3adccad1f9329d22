use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Gameplay class of a champion, used to reweight scoring pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Tank,
    Assassin,
    Enchanter,
    Mage,
    #[serde(alias = "bruiser")]
    Fighter,
    Marksman,
    /// Unclassified champion, scored with the balanced role weights
    #[default]
    Generic,
}

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Tank => "tank",
            Archetype::Assassin => "assassin",
            Archetype::Enchanter => "enchanter",
            Archetype::Mage => "mage",
            Archetype::Fighter => "fighter",
            Archetype::Marksman => "marksman",
            Archetype::Generic => "generic",
        }
    }
}

impl Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionClass {
    pub archetype: Archetype,
    /// Per-role overrides, e.g. Seraphine is an enchanter as support but a mage in lane
    #[serde(default)]
    pub roles: HashMap<Role, Archetype>,
}

/// Champion + role classification, loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeTable {
    #[serde(default)]
    champions: HashMap<String, ChampionClass>,
}

impl ArchetypeTable {
    /// Parse a TOML table of the form
    ///
    /// ```toml
    /// [champions.SENNA]
    /// archetype = "marksman"
    /// roles = { support = "enchanter" }
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let raw: ArchetypeTable = toml::from_str(contents)?;
        Ok(Self {
            champions: raw
                .champions
                .into_iter()
                .map(|(champion, class)| (normalize(&champion), class))
                .collect(),
        })
    }

    pub fn insert(&mut self, champion: &str, class: ChampionClass) {
        self.champions.insert(normalize(champion), class);
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    /// Classify a champion played in a role. Returns `None` for champions the table
    /// does not know about.
    pub fn classify(&self, champion: &str, role: Role) -> Option<Archetype> {
        let class = self.champions.get(&normalize(champion))?;
        Some(class.roles.get(&role).copied().unwrap_or(class.archetype))
    }

    /// Table shipped with the crate, covering the commonly played champions.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (archetype, champions) in BUILTIN {
            for champion in *champions {
                table.insert(
                    champion,
                    ChampionClass {
                        archetype: *archetype,
                        roles: HashMap::new(),
                    },
                );
            }
        }
        for (champion, role, archetype) in BUILTIN_ROLE_OVERRIDES {
            if let Some(class) = table.champions.get_mut(*champion) {
                class.roles.insert(*role, *archetype);
            }
        }
        table
    }
}

/// Keys are compared on their upper-cased alphanumeric characters so that
/// `"Kai'Sa"`, `"KAISA"` and `"Kaisa"` resolve to the same entry.
fn normalize(champion: &str) -> String {
    champion
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

const BUILTIN: &[(Archetype, &[&str])] = &[
    (
        Archetype::Tank,
        &[
            "ALISTAR", "AMUMU", "BRAUM", "CHOGATH", "KSANTE", "LEONA", "MALPHITE", "MAOKAI",
            "NAUTILUS", "NUNU", "ORNN", "POPPY", "RAMMUS", "RELL", "SEJUANI", "SHEN", "SION",
            "SKARNER", "TAHMKENCH", "TARIC", "THRESH", "ZAC",
        ],
    ),
    (
        Archetype::Fighter,
        &[
            "AATROX", "BELVETH", "CAMILLE", "DARIUS", "FIORA", "GAREN", "GRAGAS", "GWEN",
            "HECARIM", "ILLAOI", "IRELIA", "JARVANIV", "JAX", "LEESIN", "MONKEYKING",
            "MORDEKAISER", "NASUS", "OLAF", "PANTHEON", "REKSAI", "RENEKTON", "RIVEN", "SETT",
            "SYLAS", "TRUNDLE", "TRYNDAMERE", "URGOT", "VI", "VIEGO", "VOLIBEAR", "WARWICK",
            "XINZHAO", "YASUO", "YONE", "YORICK",
        ],
    ),
    (
        Archetype::Assassin,
        &[
            "AKALI", "EKKO", "EVELYNN", "FIZZ", "KASSADIN", "KATARINA", "KAYN", "KHAZIX",
            "LEBLANC", "NAAFIRI", "NOCTURNE", "PYKE", "QIYANA", "RENGAR", "SHACO", "TALON",
            "ZED",
        ],
    ),
    (
        Archetype::Mage,
        &[
            "AHRI", "ANIVIA", "ANNIE", "AURELIONSOL", "AZIR", "BRAND", "CASSIOPEIA", "HWEI",
            "KARTHUS", "KENNEN", "LISSANDRA", "LUX", "MALZAHAR", "MORGANA", "NEEKO", "ORIANNA",
            "RUMBLE", "RYZE", "SWAIN", "SYNDRA", "TALIYAH", "TWISTEDFATE", "VEIGAR", "VELKOZ",
            "VEX", "VIKTOR", "VLADIMIR", "XERATH", "ZIGGS", "ZOE", "ZYRA",
        ],
    ),
    (
        Archetype::Enchanter,
        &[
            "BARD", "IVERN", "JANNA", "KARMA", "LULU", "MILIO", "NAMI", "RENATA", "SERAPHINE",
            "SONA", "SORAKA", "YUUMI",
        ],
    ),
    (
        Archetype::Marksman,
        &[
            "APHELIOS", "ASHE", "CAITLYN", "CORKI", "DRAVEN", "EZREAL", "GRAVES", "JHIN", "JINX",
            "KAISA", "KALISTA", "KINDRED", "KOGMAW", "LUCIAN", "MISSFORTUNE", "NILAH", "QUINN",
            "SAMIRA", "SENNA", "SIVIR", "SMOLDER", "TRISTANA", "TWITCH", "VARUS", "VAYNE",
            "XAYAH", "ZERI",
        ],
    ),
];

const BUILTIN_ROLE_OVERRIDES: &[(&str, Role, Archetype)] = &[
    ("SERAPHINE", Role::Mid, Archetype::Mage),
    ("SERAPHINE", Role::Bot, Archetype::Mage),
    ("KARMA", Role::Mid, Archetype::Mage),
    ("KARMA", Role::Top, Archetype::Mage),
    ("SENNA", Role::Support, Archetype::Enchanter),
    ("MORGANA", Role::Support, Archetype::Enchanter),
    ("PANTHEON", Role::Support, Archetype::Assassin),
    ("GRAGAS", Role::Jungle, Archetype::Tank),
];
