//! Healthcare records: patients and the prescriptions issued to them.

use crate::model::entity::{Entity, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Patient {
    pub id: EntityId,
    pub name: String,
    pub age: u32,
    pub gender: String,
}

impl Patient {
    pub fn new(id: EntityId, name: impl Into<String>, age: u32, gender: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            gender: gender.into(),
        }
    }
}

impl Entity for Patient {
    const KIND: &'static str = "patient";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Display for Patient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patient ID: {}, Name: {}, Age: {}, Gender: {}",
            self.id, self.name, self.age, self.gender
        )
    }
}

/// A medication issued to one patient.
///
/// `patient_id` is a plain reference; the prescriptions repository does not
/// check that the patient exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Prescription {
    pub id: EntityId,
    pub patient_id: EntityId,
    pub medication_name: String,
    pub date_issued: NaiveDate,
}

impl Prescription {
    pub fn new(
        id: EntityId,
        patient_id: EntityId,
        medication_name: impl Into<String>,
        date_issued: NaiveDate,
    ) -> Self {
        Self {
            id,
            patient_id,
            medication_name: medication_name.into(),
            date_issued,
        }
    }
}

impl Entity for Prescription {
    const KIND: &'static str = "prescription";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Display for Prescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Prescription ID: {}, Medication: {}, Issued: {}",
            self.id,
            self.medication_name,
            self.date_issued.format("%Y-%m-%d")
        )
    }
}
