use diesel::prelude::*;

use crate::domain::template::{NewTemplate, Template};
use crate::domain::types::{ProfileId, TemplateId};
use crate::models::template::{NewTemplate as DbNewTemplate, Template as DbTemplate};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TemplateReader, TemplateWriter};

impl TemplateReader for DieselRepository {
    fn get_template_by_id(
        &self,
        id: TemplateId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Template>> {
        use crate::schema::templates;

        let mut conn = self.conn()?;
        let db_template = templates::table
            .filter(templates::id.eq(id.get()))
            .filter(templates::profile_id.eq(profile_id.get()))
            .first::<DbTemplate>(&mut conn)
            .optional()?;

        Ok(db_template.map(Template::try_from).transpose()?)
    }

    fn list_templates(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Template>> {
        use crate::schema::templates;

        let mut conn = self.conn()?;
        let templates = templates::table
            .filter(templates::profile_id.eq(profile_id.get()))
            .order(templates::name.asc())
            .load::<DbTemplate>(&mut conn)?
            .into_iter()
            .map(Template::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(templates)
    }
}

impl TemplateWriter for DieselRepository {
    fn create_template(&self, new_template: &NewTemplate) -> RepositoryResult<Template> {
        use crate::schema::templates;

        let mut conn = self.conn()?;
        let db_new_template: DbNewTemplate = new_template.into();

        let db_template = diesel::insert_into(templates::table)
            .values(&db_new_template)
            .get_result::<DbTemplate>(&mut conn)?;

        Ok(Template::try_from(db_template)?)
    }

    fn delete_template(&self, id: TemplateId, profile_id: ProfileId) -> RepositoryResult<()> {
        use crate::schema::templates;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            templates::table
                .filter(templates::id.eq(id.get()))
                .filter(templates::profile_id.eq(profile_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
