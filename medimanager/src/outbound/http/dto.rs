//! Wire DTOs for the doctor REST API.
//!
//! The adapter decodes into these transport shapes first, then maps them to
//! domain records in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{DoctorDraft, DoctorId, DoctorRecord};

/// Identifier as the backend serialises it: a JSON number or string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawDoctorIdDto {
    Number(i64),
    Text(String),
}

impl RawDoctorIdDto {
    fn into_text(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DoctorDto {
    pub(super) id: Option<RawDoctorIdDto>,
    #[serde(default)]
    pub(super) doctor_name: Option<String>,
    #[serde(default)]
    pub(super) contact: Option<String>,
    #[serde(default)]
    pub(super) address: Option<String>,
    #[serde(default)]
    pub(super) timing: Option<String>,
    #[serde(default)]
    pub(super) available_days: Option<String>,
}

impl DoctorDto {
    pub(super) fn into_domain(self) -> Result<DoctorRecord, String> {
        let raw_id = self
            .id
            .map(RawDoctorIdDto::into_text)
            .ok_or_else(|| "doctor record missing id".to_owned())?;
        let id = DoctorId::new(&raw_id).map_err(|err| format!("doctor record id: {err}"))?;
        Ok(DoctorRecord::new(
            id,
            DoctorDraft {
                doctor_name: self.doctor_name.unwrap_or_default(),
                contact: self.contact.unwrap_or_default(),
                address: self.address.unwrap_or_default(),
                timing: self.timing.unwrap_or_default(),
                available_days: self.available_days.unwrap_or_default(),
            },
        ))
    }
}

/// Request body for create and update. Never carries an id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DoctorPayloadDto<'a> {
    pub(super) doctor_name: &'a str,
    pub(super) contact: &'a str,
    pub(super) address: &'a str,
    pub(super) timing: &'a str,
    pub(super) available_days: &'a str,
}

impl<'a> From<&'a DoctorDraft> for DoctorPayloadDto<'a> {
    fn from(draft: &'a DoctorDraft) -> Self {
        Self {
            doctor_name: &draft.doctor_name,
            contact: &draft.contact,
            address: &draft.address,
            timing: &draft.timing,
            available_days: &draft.available_days,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

/// Error envelope some backend failures carry.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorDto {
    pub(super) message: Option<String>,
}

pub(super) fn decode_doctor(body: &[u8]) -> Result<DoctorRecord, String> {
    let dto: DoctorDto =
        serde_json::from_slice(body).map_err(|err| format!("invalid doctor JSON: {err}"))?;
    dto.into_domain()
}

pub(super) fn decode_doctors(body: &[u8]) -> Result<Vec<DoctorRecord>, String> {
    let dtos: Vec<DoctorDto> =
        serde_json::from_slice(body).map_err(|err| format!("invalid doctor list JSON: {err}"))?;
    dtos.into_iter().map(DoctorDto::into_domain).collect()
}
