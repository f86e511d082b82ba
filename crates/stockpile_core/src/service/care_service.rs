//! Patient and prescription lookups.
//!
//! # Responsibility
//! - Own the patient and prescription repositories.
//! - Maintain a patient-id -> prescriptions index built from the repository.
//!
//! # Invariants
//! - The index is a derived view; callers rebuild it after mutating
//!   prescriptions (`revoke_prescription` rebuilds it itself).

use crate::model::care::{Patient, Prescription};
use crate::model::entity::EntityId;
use crate::repo::typed_repo::{EntityRepository, InMemoryRepository, RepoResult};
use chrono::{Days, NaiveDate};
use log::info;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CareService {
    patients: InMemoryRepository<Patient>,
    prescriptions: InMemoryRepository<Prescription>,
    by_patient: BTreeMap<EntityId, Vec<Prescription>>,
}

impl CareService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds three patients and five prescriptions issued before `today`.
    pub fn seed(&mut self, today: NaiveDate) -> RepoResult<()> {
        self.patients.add(Patient::new(1, "Alice Johnson", 28, "Female"))?;
        self.patients.add(Patient::new(2, "Bob Smith", 45, "Male"))?;
        self.patients.add(Patient::new(3, "Carol Davis", 32, "Female"))?;

        let issued = |days: u64| today.checked_sub_days(Days::new(days)).unwrap_or(today);
        self.prescriptions
            .add(Prescription::new(101, 1, "Ibuprofen 400mg", issued(10)))?;
        self.prescriptions
            .add(Prescription::new(102, 1, "Vitamin D3", issued(5)))?;
        self.prescriptions
            .add(Prescription::new(103, 2, "Metformin 500mg", issued(7)))?;
        self.prescriptions
            .add(Prescription::new(104, 2, "Lisinopril 10mg", issued(3)))?;
        self.prescriptions
            .add(Prescription::new(105, 3, "Amoxicillin 250mg", issued(1)))?;
        Ok(())
    }

    pub fn add_patient(&mut self, patient: Patient) -> RepoResult<EntityId> {
        self.patients.add(patient)
    }

    pub fn add_prescription(&mut self, prescription: Prescription) -> RepoResult<EntityId> {
        self.prescriptions.add(prescription)
    }

    pub fn patients(&self) -> Vec<Patient> {
        self.patients.get_all()
    }

    /// Rebuilds the patient index; returns the number of patient groups.
    pub fn build_prescription_map(&mut self) -> usize {
        self.by_patient = self.prescriptions.group_by(|p| p.patient_id);
        info!(
            "event=care_index_build module=service status=ok groups={}",
            self.by_patient.len()
        );
        self.by_patient.len()
    }

    /// Indexed prescriptions of `patient_id`; empty when none are indexed.
    pub fn prescriptions_by_patient_id(&self, patient_id: EntityId) -> Vec<Prescription> {
        self.by_patient.get(&patient_id).cloned().unwrap_or_default()
    }

    /// Patient plus their indexed prescriptions, oldest first.
    ///
    /// # Errors
    /// - `NotFound` when no patient has `patient_id`.
    pub fn prescriptions_for(&self, patient_id: EntityId) -> RepoResult<(Patient, Vec<Prescription>)> {
        let patient = self.patients.get_by_id(patient_id)?;
        let mut prescriptions = self.prescriptions_by_patient_id(patient_id);
        prescriptions.sort_by_key(|p| p.date_issued);
        Ok((patient, prescriptions))
    }

    /// First patient with exactly `name`.
    pub fn find_patient_by_name(&self, name: &str) -> Option<Patient> {
        self.patients.find(|patient| patient.name == name)
    }

    /// Removes the first prescription of `medication_name` for `patient_id`
    /// and refreshes the index. Returns `None` when nothing matched.
    pub fn revoke_prescription(
        &mut self,
        patient_id: EntityId,
        medication_name: &str,
    ) -> Option<Prescription> {
        let removed = self
            .prescriptions
            .remove_where(|p| p.patient_id == patient_id && p.medication_name == medication_name)?;
        self.build_prescription_map();
        Some(removed)
    }
}
