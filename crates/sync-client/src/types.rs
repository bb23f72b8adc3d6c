//! Wire types for the `/sync/pull` and `/sync/push` endpoints.

use serde::{Deserialize, Serialize};

use gatecheck_core::enrollments::Enrollment;
use gatecheck_core::events::Event;
use gatecheck_core::payments::Payment;
use gatecheck_core::sync::{AttendanceCreate, EntryCreate, PullBatch, PushRequest};
use gatecheck_core::users::User;

/// Body of `POST /sync/pull`. `lastPulledAt: null` signals a full resync,
/// so the field is always serialized.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestBody {
    #[serde(rename = "lastPulledAt")]
    pub last_pulled_at: Option<String>,
}

/// Envelope of the pull response.
#[derive(Debug, Clone, Deserialize)]
pub struct PullResponse {
    pub data: PullResponseData,
}

/// Entity arrays the backend sends; absent arrays mean "no changes".
#[derive(Debug, Clone, Deserialize)]
pub struct PullResponseData {
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub events: Option<Vec<Event>>,
    #[serde(default)]
    pub enrollments: Option<Vec<Enrollment>>,
    #[serde(default)]
    pub payments: Option<Vec<Payment>>,
    pub timestamp: String,
}

impl From<PullResponseData> for PullBatch {
    fn from(data: PullResponseData) -> Self {
        Self {
            users: data.users.unwrap_or_default(),
            events: data.events.unwrap_or_default(),
            enrollments: data.enrollments.unwrap_or_default(),
            payments: data.payments.unwrap_or_default(),
            timestamp: data.timestamp,
        }
    }
}

/// One created-records category in the push body.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRecords<T> {
    pub created: Vec<T>,
}

/// Body of `POST /sync/push`. Empty categories are omitted entirely.
#[derive(Debug, Clone, Serialize)]
pub struct PushRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<CreatedRecords<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<CreatedRecords<EntryCreate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<CreatedRecords<AttendanceCreate>>,
}

impl From<&PushRequest> for PushRequestBody {
    fn from(request: &PushRequest) -> Self {
        fn wrap<T: Clone>(records: &[T]) -> Option<CreatedRecords<T>> {
            if records.is_empty() {
                None
            } else {
                Some(CreatedRecords {
                    created: records.to_vec(),
                })
            }
        }

        Self {
            users: wrap(&request.users_created),
            entries: wrap(&request.entries_created),
            attendance: wrap(&request.attendance_created),
        }
    }
}

/// Per-category acknowledgment counts.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WireCounts {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub processed: usize,
}

/// Push response payload. Partial failure shows up as
/// `processed < total` plus entries in `errors`, not as an HTTP error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushResponseData {
    #[serde(default)]
    pub users: WireCounts,
    #[serde(default)]
    pub entries: WireCounts,
    #[serde(default)]
    pub attendance: WireCounts,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

/// Envelope of the push response.
#[derive(Debug, Clone, Deserialize)]
pub struct PushResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: PushResponseData,
}

/// Error body the backend returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
