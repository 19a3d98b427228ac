use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::ProfileId;
use crate::forms::FormError;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Client payload used for both creation and updates.
pub struct ClientForm {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

impl ClientForm {
    pub fn into_new_client(self, profile_id: ProfileId) -> Result<NewClient, FormError> {
        self.validate()?;
        Ok(NewClient::try_new(
            profile_id,
            self.name,
            self.email,
            self.phone,
            self.address,
            self.notes,
        )?)
    }

    pub fn into_update(self) -> Result<UpdateClient, FormError> {
        self.validate()?;
        Ok(UpdateClient::try_new(
            self.name,
            self.email,
            self.phone,
            self.address,
            self.notes,
        )?)
    }
}

/// Bulk import of clients from CSV text.
///
/// The header row must contain a `name` column; `email`, `phone` and
/// `address` are picked up when present and every other column is ignored.
/// Rows without any value are skipped.
pub struct ClientsCsv<'a> {
    data: &'a [u8],
}

impl<'a> ClientsCsv<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn parse(&self, profile_id: ProfileId) -> Result<Vec<NewClient>, FormError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(self.data);

        let headers = reader
            .headers()
            .map_err(|e| FormError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_ascii_lowercase())
            .collect::<Vec<_>>();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let name_idx =
            column("name").ok_or_else(|| FormError::Csv("missing `name` column".into()))?;
        let email_idx = column("email");
        let phone_idx = column("phone");
        let address_idx = column("address");

        let mut clients = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| FormError::Csv(e.to_string()))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            // Header is line 1.
            let line = row + 2;
            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .map(str::to_string)
                    .filter(|v| !v.is_empty())
            };

            let name = field(Some(name_idx))
                .ok_or_else(|| FormError::Csv(format!("line {line}: name is required")))?;
            let client = NewClient::try_new(
                profile_id,
                name,
                field(email_idx),
                field(phone_idx),
                field(address_idx),
                None,
            )
            .map_err(|e| FormError::Csv(format!("line {line}: {e}")))?;
            clients.push(client);
        }

        Ok(clients)
    }
}
