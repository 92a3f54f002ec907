use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time-of-day shift a Turma runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turno {
    Matutino,
    Vespertino,
    Noturno,
    Integral,
}

impl Turno {
    pub const ALL: [Turno; 4] = [
        Turno::Matutino,
        Turno::Vespertino,
        Turno::Noturno,
        Turno::Integral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Turno::Matutino => "matutino",
            Turno::Vespertino => "vespertino",
            Turno::Noturno => "noturno",
            Turno::Integral => "integral",
        }
    }

    /// Human-readable label shown by the UI layer.
    pub fn label(&self) -> &'static str {
        match self {
            Turno::Matutino => "Matutino",
            Turno::Vespertino => "Vespertino",
            Turno::Noturno => "Noturno",
            Turno::Integral => "Integral",
        }
    }
}

impl fmt::Display for Turno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Turno {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "matutino" => Ok(Turno::Matutino),
            "vespertino" => Ok(Turno::Vespertino),
            "noturno" => Ok(Turno::Noturno),
            "integral" => Ok(Turno::Integral),
            other => Err(format!("Turno inválido: {other}")),
        }
    }
}
