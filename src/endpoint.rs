use reqwest::StatusCode;

/// One remote operation: where to POST and which status means success.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Endpoint {
    /// Operation label used in timing messages.
    pub name: &'static str,
    /// Path below the connector base URL.
    pub path: &'static str,
    pub expected_status: StatusCode,
}

impl Endpoint {
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            expected_status: StatusCode::OK,
        }
    }

    pub const fn with_expected_status(self, status: StatusCode) -> Self {
        Self {
            expected_status: status,
            ..self
        }
    }
}

pub const BUILD: Endpoint = Endpoint::new("buildRecord", "/api/v1/openbuildservice");
pub const CLASSIFICATION_CHECK: Endpoint =
    Endpoint::new("classificationCheck", "/api/v2/classificationcheck");
pub const DOUBLE_RECORD_CHECK: Endpoint =
    Endpoint::new("doubleRecordCheck", "/api/v2/doublerecordcheck");
pub const UPDATE_RECORD: Endpoint = Endpoint::new("updateRecord", "/api/v1/updateservice");
pub const GET_SCHEMAS: Endpoint = Endpoint::new("getSchemas", "/api/v1/updateservice/getschemas");

/// Joins a base URL and an endpoint path with exactly one `/` between them.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{endpoint_url, Endpoint, DOUBLE_RECORD_CHECK};

    #[test]
    fn joins_without_double_slash() {
        assert_eq!(
            endpoint_url("http://localhost:8080/", DOUBLE_RECORD_CHECK.path),
            "http://localhost:8080/api/v2/doublerecordcheck"
        );
        assert_eq!(
            endpoint_url("http://host/UpdateService/rest", "api/v1/updateservice"),
            "http://host/UpdateService/rest/api/v1/updateservice"
        );
    }

    #[test]
    fn expected_status_defaults_to_ok() {
        let endpoint = Endpoint::new("ping", "/ping");
        assert_eq!(endpoint.expected_status, StatusCode::OK);
        assert_eq!(
            endpoint
                .with_expected_status(StatusCode::CREATED)
                .expected_status,
            StatusCode::CREATED
        );
    }
}
