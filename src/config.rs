use std::str::FromStr;

/// Which half of a metric/imperial value pair to read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerticalUnit {
    Metres,
    Feet,
}

impl VerticalUnit {
    pub fn index(self) -> usize {
        match self {
            VerticalUnit::Metres => 0,
            VerticalUnit::Feet => 1,
        }
    }
}

impl FromStr for VerticalUnit {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" | "metres" | "meters" => Ok(VerticalUnit::Metres),
            "ft" | "feet" => Ok(VerticalUnit::Feet),
            _ => Err(format!("{} is not a vertical unit (m, ft)", s)),
        }
    }
}

/// Position of a language variant inside slash-delimited labels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Language {
    German,
    English,
}

impl Language {
    pub fn index(self) -> usize {
        match self {
            Language::German => 0,
            Language::English => 1,
        }
    }
}

impl FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "de" | "german" => Ok(Language::German),
            "en" | "english" => Ok(Language::English),
            _ => Err(format!("{} is not a language (de, en)", s)),
        }
    }
}

/// Run-wide selectors, fixed before the first row is decoded.
#[derive(Clone, Debug)]
pub struct Config {
    pub unit: VerticalUnit,
    pub language: Language,
    /// Literal text that marks a yes/no field as "yes".
    pub yes_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unit: VerticalUnit::Metres,
            language: Language::English,
            yes_marker: "yes".to_owned(),
        }
    }
}
