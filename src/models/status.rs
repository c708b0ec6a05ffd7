use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase of a ficha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FichaStatus {
    /// In-session classwork
    Lectiva,
    /// Elective (practical) phase
    Electiva,
    /// Closed
    Finalizada,
}

impl FichaStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [FichaStatus; 3] = [
        FichaStatus::Lectiva,
        FichaStatus::Electiva,
        FichaStatus::Finalizada,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FichaStatus::Lectiva => "lectiva",
            FichaStatus::Electiva => "electiva",
            FichaStatus::Finalizada => "finalizada",
        }
    }
}

impl fmt::Display for FichaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FichaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lectiva" => Ok(FichaStatus::Lectiva),
            "electiva" => Ok(FichaStatus::Electiva),
            "finalizada" => Ok(FichaStatus::Finalizada),
            _ => Err(format!(
                "Invalid status '{}'. Valid options: lectiva, electiva, finalizada",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", FichaStatus::Lectiva), "lectiva");
        assert_eq!(format!("{}", FichaStatus::Electiva), "electiva");
        assert_eq!(format!("{}", FichaStatus::Finalizada), "finalizada");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            FichaStatus::from_str("lectiva").unwrap(),
            FichaStatus::Lectiva
        );
        assert_eq!(
            FichaStatus::from_str("ELECTIVA").unwrap(),
            FichaStatus::Electiva
        );
        assert_eq!(
            FichaStatus::from_str(" Finalizada ").unwrap(),
            FichaStatus::Finalizada
        );
    }

    #[test]
    fn test_status_from_str_invalid() {
        assert!(FichaStatus::from_str("activa").is_err());
        assert!(FichaStatus::from_str("").is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&FichaStatus::Electiva).unwrap();
        assert_eq!(json, "\"electiva\"");

        let unknown: Result<FichaStatus, _> = serde_json::from_str("\"cerrada\"");
        assert!(unknown.is_err());
    }

    #[test]
    fn test_all_is_closed_set() {
        assert_eq!(FichaStatus::ALL.len(), 3);
        for status in FichaStatus::ALL {
            assert_eq!(FichaStatus::from_str(status.as_str()).unwrap(), status);
        }
    }
}
