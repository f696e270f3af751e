use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Healthera platform user role. Determines which dashboard the user lands on after login and
/// which sections of the application they may access.
#[derive(
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    AsRefStr,
    PartialEq,
    Eq,
    Debug,
    Copy,
    Clone,
)]
pub enum Role {
    #[serde(rename = "lender")]
    #[strum(serialize = "lender")]
    Lender,
    #[serde(rename = "applicant")]
    #[strum(serialize = "applicant")]
    Applicant,
}

impl Role {
    /// Short description of the role as shown on the landing page
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Lender => {
                "Funds equipment loans, reviews incoming applications and tracks the resulting \
                 portfolio from the lender dashboard"
            }
            Self::Applicant => {
                "Requests financing for healthcare equipment and follows the state of submitted \
                 applications from the applicant dashboard"
            }
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::Role;

    #[rstest]
    #[case::lender(Role::Lender, "lender")]
    #[case::applicant(Role::Applicant, "applicant")]
    fn role_should_round_trip_through_wire_name(#[case] role: Role, #[case] name: &str) {
        assert_eq!(role.as_ref(), name);
        assert_eq!(name.parse::<Role>().unwrap(), role);
    }
}
