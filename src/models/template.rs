use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::template::{NewTemplate as DomainNewTemplate, Template as DomainTemplate};
use crate::domain::types::{ProfileId, TemplateId, TemplateName, TypeConstraintError};
use crate::models::{from_json_column, to_json_column};
use crate::pricing::{Complexity, Trade};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::templates)]
pub struct Template {
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    pub trade: String,
    pub complexity: String,
    pub measurements: String,
    pub addons: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::templates)]
pub struct NewTemplate<'a> {
    pub profile_id: i32,
    pub name: &'a str,
    pub trade: &'static str,
    pub complexity: &'static str,
    pub measurements: String,
    pub addons: String,
}

impl TryFrom<Template> for DomainTemplate {
    type Error = TypeConstraintError;

    fn try_from(template: Template) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TemplateId::try_from(template.id)?,
            profile_id: ProfileId::try_from(template.profile_id)?,
            name: TemplateName::new(template.name)?,
            trade: template
                .trade
                .parse::<Trade>()
                .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?,
            complexity: template
                .complexity
                .parse::<Complexity>()
                .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?,
            measurements: from_json_column("measurements", &template.measurements)?,
            addons: from_json_column("addons", &template.addons)?,
            created_at: template.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewTemplate> for NewTemplate<'a> {
    fn from(template: &'a DomainNewTemplate) -> Self {
        Self {
            profile_id: template.profile_id.get(),
            name: template.name.as_str(),
            trade: template.trade.as_str(),
            complexity: template.complexity.as_str(),
            measurements: to_json_column(&template.measurements),
            addons: to_json_column(&template.addons),
        }
    }
}
