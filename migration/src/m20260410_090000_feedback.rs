use crate::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Subject {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Activity {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum University {
    Table,
    Id,
    Name,
    Url,
}

#[derive(DeriveIden)]
enum Contact {
    Table,
    Id,
    UniversityId,
    Salutation,
    Email,
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    Id,
    UniversityId,
    Secret,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FeedbackSubject {
    Table,
    FeedbackId,
    SubjectId,
}

#[derive(DeriveIden)]
enum FeedbackActivity {
    Table,
    FeedbackId,
    ActivityId,
}

#[derive(DeriveIden)]
enum CatalogComment {
    Table,
    Id,
    FeedbackId,
    Target,
    TargetId,
    Comment,
    Status,
    CreatedAt,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum CommentStatus {
    #[sea_orm(iden = "comment_status")]
    Enum,
    #[sea_orm(iden = "open")]
    Open,
    #[sea_orm(iden = "accepted")]
    Accepted,
    #[sea_orm(iden = "discarded")]
    Discarded,
}

#[derive(DeriveIden)]
enum CommentTarget {
    #[sea_orm(iden = "comment_target")]
    Enum,
    #[sea_orm(iden = "ability")]
    Ability,
    #[sea_orm(iden = "symptom")]
    Symptom,
    #[sea_orm(iden = "skill")]
    Skill,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(CommentStatus::Enum)
                    .values([
                        CommentStatus::Open,
                        CommentStatus::Accepted,
                        CommentStatus::Discarded,
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(CommentTarget::Enum)
                    .values([
                        CommentTarget::Ability,
                        CommentTarget::Symptom,
                        CommentTarget::Skill,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(University::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(University::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(University::Name).string_len(512).not_null())
                    .col(ColumnDef::new(University::Url).string_len(2048).not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contact::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contact::UniversityId).integer().not_null())
                    .col(ColumnDef::new(Contact::Salutation).text().not_null())
                    .col(ColumnDef::new(Contact::Email).string_len(320).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_university")
                            .from(Contact::Table, Contact::UniversityId)
                            .to(University::Table, University::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::UniversityId).integer().not_null())
                    .col(
                        ColumnDef::new(Feedback::Secret)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Feedback::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_university")
                            .from(Feedback::Table, Feedback::UniversityId)
                            .to(University::Table, University::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(FeedbackSubject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackSubject::FeedbackId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackSubject::SubjectId)
                            .string_len(128)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(FeedbackSubject::FeedbackId)
                            .col(FeedbackSubject::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_subject_feedback")
                            .from(FeedbackSubject::Table, FeedbackSubject::FeedbackId)
                            .to(Feedback::Table, Feedback::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_subject_subject")
                            .from(FeedbackSubject::Table, FeedbackSubject::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(FeedbackActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackActivity::FeedbackId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedbackActivity::ActivityId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(FeedbackActivity::FeedbackId)
                            .col(FeedbackActivity::ActivityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_activity_feedback")
                            .from(FeedbackActivity::Table, FeedbackActivity::FeedbackId)
                            .to(Feedback::Table, Feedback::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_activity_activity")
                            .from(FeedbackActivity::Table, FeedbackActivity::ActivityId)
                            .to(Activity::Table, Activity::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(CatalogComment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogComment::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogComment::FeedbackId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogComment::Target)
                            .custom(CommentTarget::Enum)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CatalogComment::TargetId).integer().not_null())
                    .col(ColumnDef::new(CatalogComment::Comment).text().not_null())
                    .col(
                        ColumnDef::new(CatalogComment::Status)
                            .custom(CommentStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogComment::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CatalogComment::ModifiedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_comment_feedback")
                            .from(CatalogComment::Table, CatalogComment::FeedbackId)
                            .to(Feedback::Table, Feedback::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("catalog_comment_target_idx")
                    .table(CatalogComment::Table)
                    .col(CatalogComment::FeedbackId)
                    .col(CatalogComment::Target)
                    .col(CatalogComment::TargetId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogComment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedbackActivity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeedbackSubject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contact::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(University::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(CommentTarget::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(CommentStatus::Enum).to_owned())
            .await?;
        Ok(())
    }
}
