#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseStatusError, TransitionError};

/// Enrollment state of a workshop registration.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "registered"))]
    Registered,
    /// Cancelled by the student or an administrator. Terminal.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "cancelled"))]
    Cancelled,
}

impl RegistrationStatus {
    pub const ALL: &'static [RegistrationStatus] = &[Self::Registered, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, next: RegistrationStatus) -> bool {
        matches!((self, next), (Self::Registered, Self::Cancelled))
    }

    /// States a record must be in to move to `next`.
    pub fn sources_of(next: RegistrationStatus) -> impl Iterator<Item = RegistrationStatus> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |from| from.can_transition_to(next))
    }

    pub fn transition_to(
        &self,
        next: RegistrationStatus,
    ) -> Result<RegistrationStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseStatusError::new(
                s,
                Self::ALL.iter().map(|st| st.as_str()),
            )),
        }
    }
}
