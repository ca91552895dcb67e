use std::fmt;
use std::str::FromStr;

/// Model identifiers recognized by the inference gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTag {
    BrainTumor,
    HeartDisease,
}

impl ModelTag {
    pub const ALL: [ModelTag; 2] = [ModelTag::BrainTumor, ModelTag::HeartDisease];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTag::BrainTumor => "brain_tumor",
            ModelTag::HeartDisease => "heart_disease",
        }
    }
}

impl TryFrom<&str> for ModelTag {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "brain_tumor" => Ok(Self::BrainTumor),
            "heart_disease" => Ok(Self::HeartDisease),
            other => Err(format!(
                "Unknown model tag: {}. Expected: brain_tumor or heart_disease",
                other
            )),
        }
    }
}

impl FromStr for ModelTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
