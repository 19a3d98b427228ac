//! DTOs for the client endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::project::Project;

/// Query parameters accepted by `GET /api/clients`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientsQuery {
    /// Free-form search applied to name, email, phone and address.
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// A client together with its projects.
#[derive(Debug, Serialize)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: Client,
    pub projects: Vec<Project>,
}

/// Result of a CSV upload.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported: usize,
}
