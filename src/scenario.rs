use super::*;

/// Every member has one vote and more than half of all members must agree.
pub fn majority<K: Kind>(population: Population<K>) -> anyhow::Result<CoalitionalGame<K>> {
    let voting = Voting::majority(&population);
    CoalitionalGame::new(population, voting)
}

/// Two left gloves (type 0) and one right glove (type 1); a matched pair is worth 1.
pub fn glove() -> anyhow::Result<CoalitionalGame<String>> {
    let population = Population::<String>::try_from("0:2,1:1")?;
    let table = Table::parse_grouped("0:1,1:1=1", &population)?;
    CoalitionalGame::new(population, table)
}

/// The glove game with three named players: 0 and 1 hold left gloves, 2 the right one.
pub fn glove_ungrouped() -> anyhow::Result<CoalitionalGame<String>> {
    let (population, table) = Table::parse_ungrouped("0,2=1; 1,2=1")?;
    CoalitionalGame::new(population, table)
}

/// UN Security Council before 1965: all 5 permanent members and 2 of the 6 others.
pub fn security_council_1945() -> anyhow::Result<CoalitionalGame<String>> {
    council("P:5,T:6", "P:5,T:2=1")
}

/// UN Security Council since 1965: all 5 permanent members and 4 of the 10 others.
pub fn security_council_1965() -> anyhow::Result<CoalitionalGame<String>> {
    council("P:5,T:10", "P:5,T:4=1")
}

fn council(types: &str, winning: &str) -> anyhow::Result<CoalitionalGame<String>> {
    let population = Population::<String>::try_from(types)?;
    let table = Table::parse_grouped(winning, &population)?;
    CoalitionalGame::new(population, table)
}

/// Named presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Glove,
    GloveUngrouped,
    Majority,
    Council1945,
    Council1965,
}

impl Scenario {
    pub const ALL: [Self; 5] = [
        Self::Glove,
        Self::GloveUngrouped,
        Self::Majority,
        Self::Council1945,
        Self::Council1965,
    ];

    /// Builds the preset. Only the majority game reads `population`,
    /// falling back to `{A:3, B:2, C:2}`; the others have a fixed
    /// population and refuse one.
    pub fn game(
        &self,
        population: Option<Population<String>>,
    ) -> anyhow::Result<CoalitionalGame<String>> {
        anyhow::ensure!(
            population.is_none() || *self == Self::Majority,
            "scenario {} has a fixed population",
            self
        );
        match self {
            Self::Glove => glove(),
            Self::GloveUngrouped => glove_ungrouped(),
            Self::Majority => match population {
                Some(population) => majority(population),
                None => majority(Population::<String>::try_from("A:3,B:2,C:2")?),
            },
            Self::Council1945 => security_council_1945(),
            Self::Council1965 => security_council_1965(),
        }
    }
}

impl TryFrom<&str> for Scenario {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.to_string() == s.trim().to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("unknown scenario {}", s))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Glove => write!(f, "glove"),
            Self::GloveUngrouped => write!(f, "glove-ungrouped"),
            Self::Majority => write!(f, "majority"),
            Self::Council1945 => write!(f, "council-1945"),
            Self::Council1965 => write!(f, "council-1965"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_simple_and_monotonic() {
        for scenario in Scenario::ALL {
            let game = scenario.game(None).unwrap();
            assert!(game.is_simple().unwrap(), "{}", scenario);
            assert!(game.is_monotonic().unwrap(), "{}", scenario);
            assert_eq!(game.grand().unwrap(), 1.0, "{}", scenario);
        }
    }

    #[test]
    fn council_lattices() {
        assert_eq!(security_council_1945().unwrap().coalitions().count(), 42);
        assert_eq!(security_council_1965().unwrap().coalitions().count(), 66);
        let game = security_council_1945().unwrap();
        let short = Coalition::<String>::try_from("P:4,T:6").unwrap();
        let enough = Coalition::<String>::try_from("P:5,T:2").unwrap();
        assert_eq!(game.value(&short).unwrap(), 0.0);
        assert_eq!(game.value(&enough).unwrap(), 1.0);
    }

    #[test]
    fn names_round_trip() {
        for scenario in Scenario::ALL {
            let name = scenario.to_string();
            assert_eq!(Scenario::try_from(name.as_str()).unwrap(), scenario);
        }
        assert_eq!(Scenario::try_from("Council-1965").unwrap(), Scenario::Council1965);
        assert!(Scenario::try_from("chess").is_err());
    }

    #[test]
    fn majority_takes_given_population() {
        let pop = Population::<String>::try_from("X:4").unwrap();
        let game = Scenario::Majority.game(Some(pop)).unwrap();
        let three = Coalition::<String>::try_from("X:3").unwrap();
        let two = Coalition::<String>::try_from("X:2").unwrap();
        assert_eq!(game.value(&three).unwrap(), 1.0);
        assert_eq!(game.value(&two).unwrap(), 0.0);
    }

    #[test]
    fn fixed_presets_refuse_a_population() {
        for scenario in Scenario::ALL {
            let pop = Population::<String>::try_from("X:4").unwrap();
            let game = scenario.game(Some(pop));
            assert_eq!(game.is_ok(), scenario == Scenario::Majority, "{}", scenario);
        }
    }
}
