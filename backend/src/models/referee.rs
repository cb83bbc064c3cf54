use serde::{Deserialize, Serialize};

use super::availability::{AvailabilityRecord, RefereeCandidate};
use super::ids::RefereeId;

/// Persisted referee profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referee {
    pub id: RefereeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Global flag; a referee switched off here is never eligible.
    pub is_available: bool,
}

impl Referee {
    /// Shape this referee and the given windows into an evaluator candidate.
    ///
    /// Windows are taken in the order supplied.
    pub fn to_candidate<'a, I>(&self, windows: I) -> RefereeCandidate
    where
        I: IntoIterator<Item = &'a AvailabilityRecord>,
    {
        RefereeCandidate {
            id: self.id,
            name: self.name.clone(),
            is_available: self.is_available,
            availability: windows.into_iter().map(|r| r.window.clone()).collect(),
        }
    }
}

/// Request body for registering a referee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReferee {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// Partial update of a referee profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefereeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl RefereeUpdate {
    pub fn apply_to(&self, referee: &mut Referee) {
        if let Some(name) = &self.name {
            referee.name = name.clone();
        }
        if let Some(email) = &self.email {
            referee.email = Some(email.clone());
        }
        if let Some(flag) = self.is_available {
            referee.is_available = flag;
        }
    }
}
