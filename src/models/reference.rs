use serde::{Deserialize, Serialize};

/// A training program a ficha belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
}

/// A physical site where a ficha is taught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
}

impl Program {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Site {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_from_json() {
        let program: Program = serde_json::from_str(r#"{"id": 5, "name": "ADSO"}"#).unwrap();
        assert_eq!(program, Program::new(5, "ADSO"));
    }

    #[test]
    fn test_site_requires_name() {
        let result: Result<Site, _> = serde_json::from_str(r#"{"id": 2}"#);
        assert!(result.is_err());
    }
}
