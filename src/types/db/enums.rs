use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;

/// Enable/disable flag shared by users and groups, stored as its ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Status {
    #[sea_orm(num_value = 0)]
    Enable,
    #[sea_orm(num_value = 1)]
    Disable,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Enable => "ENABLE",
            Status::Disable => "DISABLE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Enable => "Enabled",
            Status::Disable => "Disabled",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Enable
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the constant names used on query strings (`ENABLE`, `DISABLE`)
impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENABLE" => Ok(Status::Enable),
            "DISABLE" => Ok(Status::Disable),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Sex {
    #[sea_orm(string_value = "M")]
    M,
    #[sea_orm(string_value = "F")]
    F,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::M => "Male",
            Sex::F => "Female",
        }
    }
}

impl Default for Sex {
    fn default() -> Self {
        Sex::M
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_constant_names() {
        assert_eq!("ENABLE".parse::<Status>(), Ok(Status::Enable));
        assert_eq!("DISABLE".parse::<Status>(), Ok(Status::Disable));
        assert_eq!(" disable ".parse::<Status>(), Ok(Status::Disable));
    }

    #[test]
    fn test_status_rejects_unknown_names() {
        assert_eq!("LOCKED".parse::<Status>(), Err("LOCKED".to_string()));
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_ordinals_match_storage() {
        assert_eq!(Status::Enable.to_value(), 0);
        assert_eq!(Status::Disable.to_value(), 1);
        assert_eq!(Status::try_from_value(&1).unwrap(), Status::Disable);
    }

    #[test]
    fn test_sex_string_values() {
        assert_eq!(Sex::M.to_value(), "M");
        assert_eq!(Sex::try_from_value(&"F".to_string()).unwrap(), Sex::F);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Status::default(), Status::Enable);
        assert_eq!(Sex::default(), Sex::M);
    }
}
