//! Request and response bodies exchanged with the update service.
//!
//! Field names follow the service's JSON contract, including its `DTO`
//! suffixes. Absent optional fields are skipped when serializing and
//! defaulted when deserializing.

use serde::{Deserialize, Serialize};

/// Record schema of MARCXchange v1 records.
pub const MARCXCHANGE_V1: &str = "info:lc/xmlns/marcxchange-v1";

/// Opaque record content, typically MARCXchange XML documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordData {
    #[serde(default)]
    pub content: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibliographicRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_packing: Option<String>,
    #[serde(
        rename = "recordDataDTO",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub record_data: Option<RecordData>,
    #[serde(
        rename = "extraRecordDataDTO",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extra_record_data: Option<RecordData>,
}

impl BibliographicRecord {
    /// Wraps one MARCXchange XML document packed as `xml`.
    pub fn marcxchange(xml: impl Into<String>) -> Self {
        Self {
            record_schema: Some(MARCXCHANGE_V1.to_owned()),
            record_packing: Some("xml".to_owned()),
            record_data: Some(RecordData {
                content: vec![xml.into()],
            }),
            extra_record_data: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub password: String,
}

impl Authentication {
    pub fn new(
        user_id: impl Into<String>,
        group_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            group_id: group_id.into(),
            password: password.into(),
        }
    }
}

/// Update processing option.
///
/// Carried as its plain name (`"VALIDATE_ONLY"`) so that a list of options
/// reads back from XML as element text rather than as tagged variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum UpdateOption {
    ValidateOnly,
    DryRun,
}

impl UpdateOption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidateOnly => "VALIDATE_ONLY",
            Self::DryRun => "DRY_RUN",
        }
    }
}

impl From<UpdateOption> for String {
    fn from(option: UpdateOption) -> Self {
        option.as_str().to_owned()
    }
}

impl TryFrom<String> for UpdateOption {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "VALIDATE_ONLY" => Ok(Self::ValidateOnly),
            "DRY_RUN" => Ok(Self::DryRun),
            other => Err(format!(
                "unknown update option '{other}', expected VALIDATE_ONLY or DRY_RUN"
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOptions {
    #[serde(default)]
    pub option: Vec<UpdateOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[serde(rename = "authenticationDTO")]
    pub authentication: Authentication,
    pub schema_name: String,
    #[serde(rename = "bibliographicRecordDTO")]
    pub bibliographic_record: BibliographicRecord,
    #[serde(rename = "optionsDTO", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<UpdateOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_record_key: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemasRequest {
    #[serde(rename = "authenticationDTO")]
    pub authentication: Authentication,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub schema_name: String,
    #[serde(default)]
    pub schema_info: String,
}

impl Schema {
    pub fn new(schema_name: impl Into<String>, schema_info: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            schema_info: schema_info.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStatus {
    #[default]
    Ok,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemasResponse {
    #[serde(rename = "schemaDTOList", default)]
    pub schemas: Vec<Schema>,
    #[serde(rename = "updateStatusEnumDTO", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UpdateStatus>,
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Warning,
    Error,
    Fatal,
}

/// Validation or diagnostic message attached to an update response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_for_documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal_position_of_field: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal_position_of_subfield: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal_position_in_subfield: Option<u32>,
}

impl MessageEntry {
    pub fn new(kind: MessageType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            code: None,
            url_for_documentation: None,
            ordinal_position_of_field: None,
            ordinal_position_of_subfield: None,
            ordinal_position_in_subfield: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(MessageType::Warning, message)
    }
}

/// A catalogued record the submitted record was found to duplicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleRecordFrontend {
    #[serde(default)]
    pub message: String,
    /// `<faust>:<agency>` identifier of the existing record.
    #[serde(default)]
    pub pid: String,
}

impl DoubleRecordFrontend {
    pub fn new(message: impl Into<String>, pid: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            pid: pid.into(),
        }
    }
}

/// Reply of the update, classification check and double record check calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordResponse {
    #[serde(rename = "updateStatusEnumDTO")]
    pub status: UpdateStatus,
    #[serde(rename = "messageEntryDTOS", default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_record_key: Option<String>,
    #[serde(
        rename = "doubleRecordFrontendDTOS",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub double_records: Vec<DoubleRecordFrontend>,
}

impl UpdateRecordResponse {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failed() -> Self {
        Self {
            status: UpdateStatus::Failed,
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == UpdateStatus::Ok
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub schema_name: String,
    #[serde(
        rename = "bibliographicRecordDTO",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bibliographic_record: Option<BibliographicRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    Ok,
    FailedInvalidSchema,
    FailedInvalidRecordSchema,
    FailedInvalidRecordPacking,
    FailedUpdateInternalError,
    FailedInternalError,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
    #[serde(rename = "buildStatusEnumDTO")]
    pub status: BuildStatus,
    #[serde(
        rename = "bibliographicRecordDTO",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bibliographic_record: Option<BibliographicRecord>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_only_reply_equals_ok() {
        let response: UpdateRecordResponse =
            serde_json::from_value(json!({"updateStatusEnumDTO": "OK"})).expect("must decode");
        assert_eq!(response, UpdateRecordResponse::ok());
        assert!(response.is_ok());
    }

    #[test]
    fn double_record_reply_decodes_entries() {
        let response: UpdateRecordResponse = serde_json::from_value(json!({
            "updateStatusEnumDTO": "FAILED",
            "doubleRecordKey": "52743f23-0522-40d7-b762-557fc717160b",
            "doubleRecordFrontendDTOS": [
                {"message": "Double record for record 52958858, reason: 021e", "pid": "52958857:870970"}
            ]
        }))
        .expect("must decode");

        assert_eq!(response.status, UpdateStatus::Failed);
        assert_eq!(response.double_records.len(), 1);
        assert_eq!(response.double_records[0].pid, "52958857:870970");
        assert!(response.messages.is_empty());
    }

    #[test]
    fn update_request_uses_service_field_names() {
        let request = UpdateServiceRequest {
            authentication: Authentication::new("", "010100", ""),
            schema_name: "dbcautoritet".to_owned(),
            bibliographic_record: BibliographicRecord::marcxchange("<record/>"),
            options: None,
            tracking_id: Some("update-warmup".to_owned()),
            double_record_key: None,
        };

        let value = serde_json::to_value(&request).expect("must encode");
        assert_eq!(value["authenticationDTO"]["groupId"], "010100");
        assert_eq!(value["schemaName"], "dbcautoritet");
        assert_eq!(
            value["bibliographicRecordDTO"]["recordSchema"],
            MARCXCHANGE_V1
        );
        assert_eq!(
            value["bibliographicRecordDTO"]["recordDataDTO"]["content"][0],
            "<record/>"
        );
        assert_eq!(value["trackingId"], "update-warmup");
        assert!(value.get("optionsDTO").is_none());
        assert!(value.get("doubleRecordKey").is_none());
    }

    #[test]
    fn message_entry_type_field() {
        let entry = MessageEntry::warning("Count: 8");
        let value = serde_json::to_value(&entry).expect("must encode");
        assert_eq!(value, json!({"type": "WARNING", "message": "Count: 8"}));
    }

    #[test]
    fn build_status_names() {
        let response: BuildResponse = serde_json::from_value(json!({
            "buildStatusEnumDTO": "FAILED_INVALID_SCHEMA"
        }))
        .expect("must decode");
        assert_eq!(response.status, BuildStatus::FailedInvalidSchema);
        assert!(response.bibliographic_record.is_none());
    }

    #[test]
    fn update_options_serialize_screaming_case() {
        let options = UpdateOptions {
            option: vec![UpdateOption::ValidateOnly],
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"option": ["VALIDATE_ONLY"]})
        );
    }

    #[test]
    fn unknown_update_option_is_rejected() {
        let err = serde_json::from_value::<UpdateOptions>(json!({"option": ["LOUD"]}))
            .expect_err("must reject");
        assert!(err.to_string().contains("LOUD"));
    }
}
