use crate::models::request::CreateUniversityRequest;
use crate::models::response::UniversityResponse;
use ::entity::{contact, university};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryOrder, TransactionTrait,
};

#[derive(Debug, Clone, Default)]
pub struct DBUniversityRepo {
    pub db_session: DatabaseConnection,
}

#[async_trait]
pub trait UniversityRepo: Send + Sync {
    /// Creates a university and its contacts in one transaction.
    async fn write_one(
        &self,
        create_university_request: CreateUniversityRequest,
    ) -> Result<UniversityResponse, DbErr>;

    async fn list(&self) -> Result<Vec<UniversityResponse>, DbErr>;

    async fn get_one(&self, id: i32) -> Result<Option<UniversityResponse>, DbErr>;
}

#[async_trait]
impl UniversityRepo for DBUniversityRepo {
    async fn write_one(
        &self,
        create_university_request: CreateUniversityRequest,
    ) -> Result<UniversityResponse, DbErr> {
        let txn = self.db_session.begin().await?;
        let new_university = university::ActiveModel {
            id: Default::default(),
            name: ActiveValue::Set(create_university_request.name),
            url: ActiveValue::Set(create_university_request.url),
        }
        .insert(&txn)
        .await?;
        let mut contacts = Vec::with_capacity(create_university_request.contacts.len());
        for contact_request in create_university_request.contacts {
            let new_contact = contact::ActiveModel {
                id: Default::default(),
                university_id: ActiveValue::Set(new_university.id),
                salutation: ActiveValue::Set(contact_request.salutation),
                email: ActiveValue::Set(contact_request.email),
            }
            .insert(&txn)
            .await?;
            contacts.push(new_contact);
        }
        txn.commit().await?;
        Ok(UniversityResponse::new(new_university, contacts))
    }

    async fn list(&self) -> Result<Vec<UniversityResponse>, DbErr> {
        let rows = university::Entity::find()
            .find_with_related(contact::Entity)
            .order_by_asc(university::Column::Name)
            .order_by_asc(university::Column::Id)
            .all(&self.db_session)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(found, contacts)| UniversityResponse::new(found, contacts))
            .collect())
    }

    async fn get_one(&self, id: i32) -> Result<Option<UniversityResponse>, DbErr> {
        let Some(found) = university::Entity::find_by_id(id)
            .one(&self.db_session)
            .await?
        else {
            return Ok(None);
        };
        let contacts = found
            .find_related(contact::Entity)
            .all(&self.db_session)
            .await?;
        Ok(Some(UniversityResponse::new(found, contacts)))
    }
}
